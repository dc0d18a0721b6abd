//! Repository for the `action_items` table.

use chrono::Utc;
use retroboard_core::types::DbId;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::item::{ActionItem, ActionItemWithAuthor, CreateActionItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, retro_id, participant_id, description, votes, created_at, updated_at";

/// Provides CRUD operations for action items.
pub struct ActionItemRepo;

impl ActionItemRepo {
    /// Insert a new action item, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateActionItem,
    ) -> Result<ActionItem, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO action_items
                 (id, retro_id, participant_id, description, votes, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActionItem>(&query)
            .bind(Uuid::new_v4())
            .bind(input.retro_id)
            .bind(input.participant_id)
            .bind(&input.description)
            .bind(input.votes)
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// List a retro's action items joined with author names, same ordering
    /// as retro items: votes descending, creation time ascending.
    pub async fn list_for_retro(
        pool: &SqlitePool,
        retro_id: DbId,
    ) -> Result<Vec<ActionItemWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, ActionItemWithAuthor>(
            "SELECT ai.id, ai.retro_id, ai.participant_id, ai.description, ai.votes,
                    ai.created_at, ai.updated_at,
                    sp.name AS author_name
             FROM action_items ai
             LEFT JOIN session_participants sp ON sp.id = ai.participant_id
             WHERE ai.retro_id = $1
             ORDER BY ai.votes DESC, ai.created_at ASC",
        )
        .bind(retro_id)
        .fetch_all(pool)
        .await
    }

    /// Update an item's description, returning the retro id of the affected
    /// row.
    pub async fn update_description(
        pool: &SqlitePool,
        id: DbId,
        description: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "UPDATE action_items SET description = $2, updated_at = $3
             WHERE id = $1
             RETURNING retro_id",
        )
        .bind(id)
        .bind(description)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await
    }

    /// Overwrite an item's vote count with a client-computed value,
    /// returning the retro id of the affected row.
    pub async fn set_votes(
        pool: &SqlitePool,
        id: DbId,
        votes: i64,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "UPDATE action_items SET votes = $2, updated_at = $3
             WHERE id = $1
             RETURNING retro_id",
        )
        .bind(id)
        .bind(votes)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await
    }

    /// Delete an item, returning the retro id of the deleted row.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("DELETE FROM action_items WHERE id = $1 RETURNING retro_id")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
