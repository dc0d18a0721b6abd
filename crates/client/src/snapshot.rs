//! Retro import/export against the shared store.
//!
//! Export turns an already-fetched retro plus its item lists into the
//! portable snapshot from [`retroboard_core::export`]. Import parses and
//! validates the snapshot first (a bad file writes nothing), then creates
//! the parent retro and inserts the two item batches in sequence. The
//! batches are not wrapped in a transaction; a failure between them leaves
//! a partially populated imported retro behind. That matches the
//! established import behavior and is covered by tests rather than fixed.

use chrono::DateTime;

use retroboard_core::error::{CoreError, CoreResult};
use retroboard_core::export::{
    parse_snapshot, RetroSnapshot, SnapshotActionItem, SnapshotRetroItem,
};
use retroboard_core::types::DbId;
use retroboard_db::models::item::{
    ActionItemWithAuthor, CreateActionItem, CreateRetroItem, RetroItemWithAuthor,
};
use retroboard_db::models::retro::{CreateRetro, Retro};

use crate::gateway::RemoteGateway;

/// Import a JSON snapshot into the workspace as a new retro named
/// `(Imported) <name>`, authored by the importing participant.
///
/// A snapshot date that is present but not RFC 3339 fails with
/// [`CoreError::ImportFormat`] before anything is written; a missing date
/// falls back to now.
pub async fn import_retro(
    gateway: &RemoteGateway,
    session_id: DbId,
    participant_id: DbId,
    json: &str,
) -> CoreResult<Retro> {
    let snapshot = parse_snapshot(json)?;

    let retro_date = snapshot
        .date
        .as_deref()
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|date| date.to_utc())
                .map_err(|err| CoreError::ImportFormat(format!("invalid retro date: {err}")))
        })
        .transpose()?;

    let retro = gateway
        .create_retro(&CreateRetro {
            session_id,
            name: format!("(Imported) {}", snapshot.name),
            retro_date,
        })
        .await?;

    // Two sequential batches with no enclosing transaction. A failure here
    // leaves the retro row (and possibly the first batch) in place.
    let retro_items: Vec<CreateRetroItem> = snapshot
        .retro_items
        .iter()
        .map(|item| CreateRetroItem {
            retro_id: retro.id,
            participant_id: Some(participant_id),
            description: item.description.clone(),
            votes: item.votes,
            column_type: item.column_type,
        })
        .collect();
    gateway.insert_retro_items_batch(&retro_items).await?;

    let action_items: Vec<CreateActionItem> = snapshot
        .action_items
        .iter()
        .map(|item| CreateActionItem {
            retro_id: retro.id,
            participant_id: Some(participant_id),
            description: item.description.clone(),
            votes: item.votes,
        })
        .collect();
    gateway.insert_action_items_batch(&action_items).await?;

    tracing::info!(retro_id = %retro.id, items = retro_items.len(), actions = action_items.len(), "Imported retro");
    Ok(retro)
}

/// Build the portable snapshot for an already-fetched retro.
///
/// Rows whose stored column no longer parses are skipped rather than
/// failing the export.
pub fn build_snapshot(
    retro: &Retro,
    retro_items: &[RetroItemWithAuthor],
    action_items: &[ActionItemWithAuthor],
) -> RetroSnapshot {
    RetroSnapshot {
        name: retro.name.clone(),
        date: Some(retro.retro_date.to_rfc3339()),
        retro_items: retro_items
            .iter()
            .filter_map(|item| {
                item.column().map(|column_type| SnapshotRetroItem {
                    description: item.description.clone(),
                    votes: item.votes,
                    column_type,
                })
            })
            .collect(),
        action_items: action_items
            .iter()
            .map(|item| SnapshotActionItem {
                description: item.description.clone(),
                votes: item.votes,
            })
            .collect(),
    }
}
