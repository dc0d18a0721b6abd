//! Repository for the `session_participants` table.

use chrono::Utc;
use retroboard_core::types::DbId;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::participant::{CreateParticipant, Participant};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, session_id, name, created_at";

/// Provides CRUD operations for workspace participants.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// Insert a new participant, returning the created row.
    ///
    /// Display names are not deduplicated; two people with the same name
    /// become two participants.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateParticipant,
    ) -> Result<Participant, sqlx::Error> {
        let query = format!(
            "INSERT INTO session_participants (id, session_id, name, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(Uuid::new_v4())
            .bind(input.session_id)
            .bind(&input.name)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Fetch a participant by id.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM session_participants WHERE id = $1");
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the roster of a workspace, oldest first.
    pub async fn list_for_session(
        pool: &SqlitePool,
        session_id: DbId,
    ) -> Result<Vec<Participant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM session_participants
             WHERE session_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(session_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a participant, returning the session id of the deleted row.
    ///
    /// Their authored items survive with a nulled author reference.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "DELETE FROM session_participants WHERE id = $1 RETURNING session_id",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
