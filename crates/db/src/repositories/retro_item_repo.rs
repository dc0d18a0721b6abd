//! Repository for the `retro_items` table.

use chrono::Utc;
use retroboard_core::types::DbId;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::item::{CreateRetroItem, RetroItem, RetroItemWithAuthor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, retro_id, participant_id, description, votes, column_type, created_at, updated_at";

/// Provides CRUD operations for categorized board items.
pub struct RetroItemRepo;

impl RetroItemRepo {
    /// Insert a new item, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateRetroItem,
    ) -> Result<RetroItem, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO retro_items
                 (id, retro_id, participant_id, description, votes, column_type,
                  created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RetroItem>(&query)
            .bind(Uuid::new_v4())
            .bind(input.retro_id)
            .bind(input.participant_id)
            .bind(&input.description)
            .bind(input.votes)
            .bind(input.column_type.as_str())
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// List a retro's items joined with author names, ordered by votes
    /// descending with creation time ascending as the tie-break, so equal-
    /// vote items keep a stable order.
    pub async fn list_for_retro(
        pool: &SqlitePool,
        retro_id: DbId,
    ) -> Result<Vec<RetroItemWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, RetroItemWithAuthor>(
            "SELECT ri.id, ri.retro_id, ri.participant_id, ri.description, ri.votes,
                    ri.column_type, ri.created_at, ri.updated_at,
                    sp.name AS author_name
             FROM retro_items ri
             LEFT JOIN session_participants sp ON sp.id = ri.participant_id
             WHERE ri.retro_id = $1
             ORDER BY ri.votes DESC, ri.created_at ASC",
        )
        .bind(retro_id)
        .fetch_all(pool)
        .await
    }

    /// Update an item's description, returning the retro id of the affected
    /// row (`None` if the item no longer exists).
    pub async fn update_description(
        pool: &SqlitePool,
        id: DbId,
        description: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "UPDATE retro_items SET description = $2, updated_at = $3
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
            "UPDATE retro_items SET votes = $2, updated_at = $3
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
        sqlx::query_scalar::<_, DbId>("DELETE FROM retro_items WHERE id = $1 RETURNING retro_id")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
