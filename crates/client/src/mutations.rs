//! Mutation engine: create/update/delete/vote with precondition checks and
//! cache invalidation.
//!
//! Contract for every operation here: a resolvable participant and retro id
//! up front (otherwise [`CoreError::Precondition`] and the gateway is never
//! contacted); on gateway success both item collections are invalidated; on
//! gateway failure the error is surfaced and the cache is left untouched —
//! no optimistic local edit is ever applied, so there is nothing to roll
//! back.

use retroboard_core::columns::RetroColumn;
use retroboard_core::error::{CoreError, CoreResult};
use retroboard_core::types::{DbId, ItemKind};
use retroboard_db::models::item::{CreateActionItem, CreateRetroItem};

use crate::cache::BoardCache;
use crate::gateway::RemoteGateway;

/// Direction of a single vote step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn delta(self) -> i64 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }
}

/// Executes board mutations for one active retro view.
pub struct MutationEngine {
    gateway: RemoteGateway,
    cache: BoardCache,
    retro_id: Option<DbId>,
    participant_id: Option<DbId>,
}

impl MutationEngine {
    /// `retro_id` and `participant_id` come from the view's context and the
    /// current identity; either may be absent, in which case every
    /// operation fails fast.
    pub fn new(
        gateway: RemoteGateway,
        cache: BoardCache,
        retro_id: Option<DbId>,
        participant_id: Option<DbId>,
    ) -> Self {
        Self {
            gateway,
            cache,
            retro_id,
            participant_id,
        }
    }

    fn context(&self) -> CoreResult<(DbId, DbId)> {
        match (self.retro_id, self.participant_id) {
            (Some(retro_id), Some(participant_id)) => Ok((retro_id, participant_id)),
            _ => Err(CoreError::Precondition(
                "Missing retro or participant ID".into(),
            )),
        }
    }

    /// Add a categorized item to the active retro.
    pub async fn add_retro_item(&self, description: &str, column: RetroColumn) -> CoreResult<()> {
        let (retro_id, participant_id) = self.context()?;
        self.gateway
            .create_retro_item(&CreateRetroItem {
                retro_id,
                participant_id: Some(participant_id),
                description: description.to_string(),
                votes: 0,
                column_type: column,
            })
            .await?;
        self.cache.invalidate_items();
        Ok(())
    }

    /// Add an action item to the active retro.
    pub async fn add_action_item(&self, description: &str) -> CoreResult<()> {
        let (retro_id, participant_id) = self.context()?;
        self.gateway
            .create_action_item(&CreateActionItem {
                retro_id,
                participant_id: Some(participant_id),
                description: description.to_string(),
                votes: 0,
            })
            .await?;
        self.cache.invalidate_items();
        Ok(())
    }

    /// Rewrite an item's description. `owned` is the caller's explicit
    /// ownership confirmation (from the access controller's check or an
    /// administrative override); without it nothing is dispatched.
    pub async fn update_item(
        &self,
        kind: ItemKind,
        id: DbId,
        description: &str,
        owned: bool,
    ) -> CoreResult<()> {
        self.context()?;
        if !owned {
            return Err(CoreError::Precondition(
                "Only the item's author may edit it".into(),
            ));
        }
        self.gateway
            .update_item_description(kind, id, description)
            .await?;
        self.cache.invalidate_items();
        Ok(())
    }

    /// Delete an item, gated by the same explicit ownership confirmation as
    /// [`update_item`](Self::update_item).
    pub async fn delete_item(&self, kind: ItemKind, id: DbId, owned: bool) -> CoreResult<()> {
        self.context()?;
        if !owned {
            return Err(CoreError::Precondition(
                "Only the item's author may delete it".into(),
            ));
        }
        self.gateway.delete_item(kind, id).await?;
        self.cache.invalidate_items();
        Ok(())
    }

    /// Step an item's vote count by one.
    ///
    /// `observed_votes` is the count from the caller's last synchronized
    /// read; it is not re-read at write time. The new count is computed
    /// here as `observed ± 1` and written whole. Two clients voting from
    /// the same observation therefore produce a lost update: the store
    /// keeps whichever write lands last, not the sum of both steps.
    pub async fn vote(
        &self,
        kind: ItemKind,
        id: DbId,
        observed_votes: i64,
        direction: VoteDirection,
    ) -> CoreResult<()> {
        self.context()?;
        let new_count = observed_votes + direction.delta();
        self.gateway.set_item_votes(kind, id, new_count).await?;
        self.cache.invalidate_items();
        Ok(())
    }
}
