//! Retro (`retros` table) models and DTOs.

use retroboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `retros` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Retro {
    pub id: DbId,
    pub session_id: DbId,
    pub name: String,
    pub retro_date: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for creating a retro. `retro_date` defaults to now when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRetro {
    pub session_id: DbId,
    pub name: String,
    pub retro_date: Option<Timestamp>,
}
