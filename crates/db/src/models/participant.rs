//! Participant (`session_participants` table) models and DTOs.

use retroboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `session_participants` table.
///
/// A participant belongs to exactly one session for its lifetime and is
/// never authenticated beyond knowing the workspace password at join time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Participant {
    pub id: DbId,
    pub session_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a participant at workspace creation or join time.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateParticipant {
    pub session_id: DbId,
    pub name: String,
}
