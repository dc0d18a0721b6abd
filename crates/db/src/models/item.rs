//! Board item (`retro_items` / `action_items` tables) models and DTOs.
//!
//! The two tables share a shape except for `column_type`, which only retro
//! items carry. List queries join the author's display name; a `None`
//! author means the participant was deleted and the item renders as
//! anonymous.

use retroboard_core::columns::RetroColumn;
use retroboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// RetroItem
// ---------------------------------------------------------------------------

/// A row from the `retro_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RetroItem {
    pub id: DbId,
    pub retro_id: DbId,
    pub participant_id: Option<DbId>,
    pub description: String,
    pub votes: i64,
    pub column_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A `retro_items` row joined with its author's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RetroItemWithAuthor {
    pub id: DbId,
    pub retro_id: DbId,
    pub participant_id: Option<DbId>,
    pub description: String,
    pub votes: i64,
    pub column_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// `None` when the authoring participant was deleted; rendered as
    /// anonymous by consumers.
    pub author_name: Option<String>,
}

impl RetroItemWithAuthor {
    /// The parsed board column. The CHECK constraint keeps stored values
    /// valid, so this only returns `None` for rows written outside the
    /// schema's guarantees.
    pub fn column(&self) -> Option<RetroColumn> {
        RetroColumn::parse(&self.column_type)
    }
}

/// DTO for inserting a retro item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRetroItem {
    pub retro_id: DbId,
    pub participant_id: Option<DbId>,
    pub description: String,
    pub votes: i64,
    pub column_type: RetroColumn,
}

// ---------------------------------------------------------------------------
// ActionItem
// ---------------------------------------------------------------------------

/// A row from the `action_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActionItem {
    pub id: DbId,
    pub retro_id: DbId,
    pub participant_id: Option<DbId>,
    pub description: String,
    pub votes: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An `action_items` row joined with its author's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActionItemWithAuthor {
    pub id: DbId,
    pub retro_id: DbId,
    pub participant_id: Option<DbId>,
    pub description: String,
    pub votes: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author_name: Option<String>,
}

/// DTO for inserting an action item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActionItem {
    pub retro_id: DbId,
    pub participant_id: Option<DbId>,
    pub description: String,
    pub votes: i64,
}
