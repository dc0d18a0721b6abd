//! Retro snapshot export/import formats.
//!
//! Two boundary formats are produced for presentation collaborators: a JSON
//! snapshot (also accepted back on import) and a generated Markdown summary.
//! Everything here is pure formatting; writing files is the caller's job.

use serde::{Deserialize, Serialize};

use crate::columns::{RetroColumn, ALL_COLUMNS};
use crate::error::{CoreError, CoreResult};

// ---------------------------------------------------------------------------
// Snapshot format
// ---------------------------------------------------------------------------

/// A portable snapshot of one retro.
///
/// Field names follow the established interchange format
/// (`retroItems` / `actionItems`), so snapshots exported elsewhere import
/// cleanly here and vice versa.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetroSnapshot {
    pub name: String,

    /// RFC 3339 date of the retro; absent in older snapshots.
    #[serde(default)]
    pub date: Option<String>,

    #[serde(rename = "retroItems")]
    pub retro_items: Vec<SnapshotRetroItem>,

    #[serde(rename = "actionItems")]
    pub action_items: Vec<SnapshotActionItem>,
}

/// One categorized board item in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRetroItem {
    pub description: String,
    #[serde(default)]
    pub votes: i64,
    pub column_type: RetroColumn,
}

/// One action item in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotActionItem {
    pub description: String,
    #[serde(default)]
    pub votes: i64,
}

/// Parse and validate a snapshot from JSON.
///
/// Fails with [`CoreError::ImportFormat`] on malformed JSON, missing
/// collections, or an empty retro name. Nothing is written by this function;
/// rejecting here guarantees the parent retro is never created for a bad
/// file.
pub fn parse_snapshot(json: &str) -> CoreResult<RetroSnapshot> {
    let snapshot: RetroSnapshot =
        serde_json::from_str(json).map_err(|e| CoreError::ImportFormat(e.to_string()))?;

    if snapshot.name.trim().is_empty() {
        return Err(CoreError::ImportFormat("retro name is missing".into()));
    }

    Ok(snapshot)
}

/// Serialize a snapshot to pretty-printed JSON, the on-disk export shape.
pub fn snapshot_to_json(snapshot: &RetroSnapshot) -> String {
    // Serialization of these plain structs cannot fail.
    serde_json::to_string_pretty(snapshot).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Markdown summary
// ---------------------------------------------------------------------------

/// Render the Markdown summary: one section per board column in display
/// order, then action items, each line `- <description> (Votes: <votes>)`.
///
/// `date_display` is the caller's formatted date string.
pub fn markdown_summary(snapshot: &RetroSnapshot, date_display: &str) -> String {
    let mut markdown = format!("# Retrospective Summary: {}\n\n", snapshot.name);
    markdown.push_str(&format!("**Date:** {date_display}\n\n"));

    for &column in ALL_COLUMNS {
        markdown.push_str(&format!("## {}\n", column.title()));
        for item in snapshot
            .retro_items
            .iter()
            .filter(|item| item.column_type == column)
        {
            markdown.push_str(&format!(
                "- {} (Votes: {})\n",
                item.description, item.votes
            ));
        }
        markdown.push('\n');
    }

    markdown.push_str("## Action Items\n");
    for item in &snapshot.action_items {
        markdown.push_str(&format!(
            "- {} (Votes: {})\n",
            item.description, item.votes
        ));
    }

    markdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sample() -> RetroSnapshot {
        RetroSnapshot {
            name: "Sprint 12".into(),
            date: Some("2024-05-01T00:00:00Z".into()),
            retro_items: vec![
                SnapshotRetroItem {
                    description: "CI got faster".into(),
                    votes: 3,
                    column_type: RetroColumn::Well,
                },
                SnapshotRetroItem {
                    description: "Too many meetings".into(),
                    votes: 5,
                    column_type: RetroColumn::Improve,
                },
            ],
            action_items: vec![SnapshotActionItem {
                description: "Timebox standup".into(),
                votes: 2,
            }],
        }
    }

    #[test]
    fn snapshot_json_round_trip_keeps_interchange_field_names() {
        let json = snapshot_to_json(&sample());
        assert!(json.contains("\"retroItems\""));
        assert!(json.contains("\"actionItems\""));

        let back = parse_snapshot(&json).unwrap();
        assert_eq!(back.name, "Sprint 12");
        assert_eq!(back.retro_items.len(), 2);
        assert_eq!(back.action_items.len(), 1);
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert_matches!(parse_snapshot("{not json"), Err(CoreError::ImportFormat(_)));
    }

    #[test]
    fn parse_rejects_missing_collections() {
        let json = r#"{"name": "Sprint 12", "retroItems": []}"#;
        assert_matches!(parse_snapshot(json), Err(CoreError::ImportFormat(_)));
    }

    #[test]
    fn parse_rejects_empty_name() {
        let json = r#"{"name": " ", "retroItems": [], "actionItems": []}"#;
        assert_matches!(parse_snapshot(json), Err(CoreError::ImportFormat(_)));
    }

    #[test]
    fn parse_defaults_missing_votes_to_zero() {
        let json = r#"{
            "name": "Sprint 12",
            "retroItems": [{"description": "a", "column_type": "well"}],
            "actionItems": [{"description": "b"}]
        }"#;
        let snapshot = parse_snapshot(json).unwrap();
        assert_eq!(snapshot.retro_items[0].votes, 0);
        assert_eq!(snapshot.action_items[0].votes, 0);
    }

    #[test]
    fn markdown_groups_by_column_then_action_items() {
        let markdown = markdown_summary(&sample(), "May 1st, 2024");
        let expected = "# Retrospective Summary: Sprint 12\n\n\
                        **Date:** May 1st, 2024\n\n\
                        ## What went well?\n\
                        - CI got faster (Votes: 3)\n\n\
                        ## What could be improved?\n\
                        - Too many meetings (Votes: 5)\n\n\
                        ## What should we start doing?\n\n\
                        ## Action Items\n\
                        - Timebox standup (Votes: 2)\n";
        assert_eq!(markdown, expected);
    }
}
