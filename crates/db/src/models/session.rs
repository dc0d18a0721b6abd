//! Workspace (`sessions` table) models and DTOs.

use retroboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sessions` table.
///
/// The password is stored and compared as plaintext; it doubles as the
/// share-link credential. This weak-auth model is intentional (see the
/// design notes) and is not to be silently strengthened.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Session {
    pub id: DbId,
    pub name: String,
    pub password: String,
    pub created_at: Timestamp,
}

/// DTO for creating a workspace.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSession {
    pub name: String,
    pub password: String,
}
