//! Repository for the `sessions` table.

use chrono::Utc;
use retroboard_core::types::DbId;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, password, created_at";

/// Provides CRUD operations for workspaces.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new workspace, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (id, name, password, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.password)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Fetch a workspace by id.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1");
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a workspace by name, used by the manual join form.
    ///
    /// Names are not unique; the oldest match wins, mirroring the join
    /// flow's single-row lookup.
    pub async fn find_by_name(
        pool: &SqlitePool,
        name: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM sessions WHERE name = $1 ORDER BY created_at ASC LIMIT 1");
        sqlx::query_as::<_, Session>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
