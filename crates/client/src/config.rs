//! Client configuration loaded from the environment.

use std::path::PathBuf;

use crate::identity::IdentityStore;

/// Runtime configuration for a client attaching to a shared store.
///
/// | Variable              | Default                          |
/// |-----------------------|----------------------------------|
/// | `DATABASE_URL`        | `sqlite://retroboard.db`         |
/// | `RETRO_IDENTITY_PATH` | user data dir + `retroboard/identity.json` |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Connection string for the shared relational store.
    pub database_url: String,
    /// Where the persisted identity record lives.
    pub identity_path: PathBuf,
}

impl ClientConfig {
    /// Load configuration from the environment, reading a `.env` file first
    /// when one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://retroboard.db".to_string());
        let identity_path = std::env::var("RETRO_IDENTITY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| IdentityStore::default_path());

        Self {
            database_url,
            identity_path,
        }
    }
}
