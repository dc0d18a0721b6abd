use std::fmt::Display;

/// Domain error taxonomy for the collaboration core.
///
/// Every fallible operation in the client surfaces one of these; callers
/// (the presentation layer) turn them into user-visible notifications.
/// Nothing here is allowed to crash a view.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Missing identity or context before a mutation. Raised before the
    /// remote store is contacted.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The remote store rejected a read or write. The message is surfaced
    /// verbatim to the user.
    #[error("{message}")]
    Remote { message: String },

    /// Workspace password or share link invalid, or identity absent. The
    /// caller redirects to the entry screen.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Malformed snapshot during retro import. The import is aborted before
    /// the parent retro is written.
    #[error("Invalid retro file format: {0}")]
    ImportFormat(String),
}

/// Convenience alias used throughout the client crates.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Wrap a store-level failure, carrying its message verbatim.
    pub fn remote(err: impl Display) -> Self {
        CoreError::Remote {
            message: err.to_string(),
        }
    }
}
