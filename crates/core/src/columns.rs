//! Retro board column categories.
//!
//! These match the `column_type` CHECK constraint on the `retro_items`
//! table. The category is fixed at item creation; no operation changes it.

use serde::{Deserialize, Serialize};

/// The three board columns a retro item can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetroColumn {
    Well,
    Improve,
    Start,
}

/// Board display order: went-well, improve, start.
pub const ALL_COLUMNS: &[RetroColumn] = &[
    RetroColumn::Well,
    RetroColumn::Improve,
    RetroColumn::Start,
];

impl RetroColumn {
    /// The value stored in the `column_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            RetroColumn::Well => "well",
            RetroColumn::Improve => "improve",
            RetroColumn::Start => "start",
        }
    }

    /// Parse a stored `column_type` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "well" => Some(RetroColumn::Well),
            "improve" => Some(RetroColumn::Improve),
            "start" => Some(RetroColumn::Start),
            _ => None,
        }
    }

    /// The heading shown for this column on the board and in summaries.
    pub fn title(self) -> &'static str {
        match self {
            RetroColumn::Well => "What went well?",
            RetroColumn::Improve => "What could be improved?",
            RetroColumn::Start => "What should we start doing?",
        }
    }
}
