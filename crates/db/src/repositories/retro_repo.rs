//! Repository for the `retros` table.

use chrono::Utc;
use retroboard_core::types::DbId;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::retro::{CreateRetro, Retro};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, session_id, name, retro_date, created_at";

/// Provides CRUD operations for retrospectives.
pub struct RetroRepo;

impl RetroRepo {
    /// Insert a new retro, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateRetro) -> Result<Retro, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO retros (id, session_id, name, retro_date, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Retro>(&query)
            .bind(Uuid::new_v4())
            .bind(input.session_id)
            .bind(&input.name)
            .bind(input.retro_date.unwrap_or(now))
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Fetch a retro by id.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Retro>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM retros WHERE id = $1");
        sqlx::query_as::<_, Retro>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a workspace's retros, newest first.
    pub async fn list_for_session(
        pool: &SqlitePool,
        session_id: DbId,
    ) -> Result<Vec<Retro>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM retros
             WHERE session_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Retro>(&query)
            .bind(session_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a retro. Items cascade at the database level. Returns `true`
    /// if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM retros WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
