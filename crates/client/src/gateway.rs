//! Remote data gateway: typed read/write primitives against the shared
//! store.
//!
//! No caching and no retries live here; every call is a single
//! request/response. Failures surface as [`CoreError::Remote`] with the
//! store's message carried verbatim. Every successful write publishes a
//! [`ChangeEvent`] on the shared bus — the store's changefeed — so other
//! clients attached to the same store learn that a collection changed.

use std::sync::Arc;

use retroboard_core::error::{CoreError, CoreResult};
use retroboard_core::types::{DbId, ItemKind};
use retroboard_db::models::item::{
    ActionItemWithAuthor, CreateActionItem, CreateRetroItem, RetroItemWithAuthor,
};
use retroboard_db::models::participant::{CreateParticipant, Participant};
use retroboard_db::models::retro::{CreateRetro, Retro};
use retroboard_db::models::session::{CreateSession, Session};
use retroboard_db::repositories::{
    ActionItemRepo, ParticipantRepo, RetroItemRepo, RetroRepo, SessionRepo,
};
use retroboard_db::DbPool;
use retroboard_events::{ChangeBus, ChangeEvent};

/// Typed gateway to the shared relational store and its changefeed.
///
/// Cheap to clone; clones share the pool and the bus.
#[derive(Clone)]
pub struct RemoteGateway {
    pool: DbPool,
    bus: Arc<ChangeBus>,
}

impl RemoteGateway {
    pub fn new(pool: DbPool, bus: Arc<ChangeBus>) -> Self {
        Self { pool, bus }
    }

    /// The change-notification bus this gateway publishes to.
    pub fn bus(&self) -> &Arc<ChangeBus> {
        &self.bus
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn find_workspace(&self, id: DbId) -> CoreResult<Option<Session>> {
        SessionRepo::find_by_id(&self.pool, id)
            .await
            .map_err(CoreError::remote)
    }

    pub async fn find_workspace_by_name(&self, name: &str) -> CoreResult<Option<Session>> {
        SessionRepo::find_by_name(&self.pool, name)
            .await
            .map_err(CoreError::remote)
    }

    pub async fn find_retro(&self, id: DbId) -> CoreResult<Option<Retro>> {
        RetroRepo::find_by_id(&self.pool, id)
            .await
            .map_err(CoreError::remote)
    }

    /// Items sorted by votes descending, then creation time ascending.
    pub async fn list_retro_items(&self, retro_id: DbId) -> CoreResult<Vec<RetroItemWithAuthor>> {
        RetroItemRepo::list_for_retro(&self.pool, retro_id)
            .await
            .map_err(CoreError::remote)
    }

    /// Same ordering as [`list_retro_items`](Self::list_retro_items).
    pub async fn list_action_items(&self, retro_id: DbId) -> CoreResult<Vec<ActionItemWithAuthor>> {
        ActionItemRepo::list_for_retro(&self.pool, retro_id)
            .await
            .map_err(CoreError::remote)
    }

    pub async fn list_participants(&self, session_id: DbId) -> CoreResult<Vec<Participant>> {
        ParticipantRepo::list_for_session(&self.pool, session_id)
            .await
            .map_err(CoreError::remote)
    }

    pub async fn list_retros(&self, session_id: DbId) -> CoreResult<Vec<Retro>> {
        RetroRepo::list_for_session(&self.pool, session_id)
            .await
            .map_err(CoreError::remote)
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    pub async fn create_session(&self, input: &CreateSession) -> CoreResult<Session> {
        SessionRepo::create(&self.pool, input)
            .await
            .map_err(CoreError::remote)
    }

    pub async fn create_participant(&self, input: &CreateParticipant) -> CoreResult<Participant> {
        let participant = ParticipantRepo::create(&self.pool, input)
            .await
            .map_err(CoreError::remote)?;
        self.bus
            .publish(ChangeEvent::participants(participant.session_id));
        Ok(participant)
    }

    /// Remove a participant. Their authored items survive with a nulled
    /// author reference. Returns `false` when the row was already gone.
    pub async fn delete_participant(&self, id: DbId) -> CoreResult<bool> {
        let session_id = ParticipantRepo::delete(&self.pool, id)
            .await
            .map_err(CoreError::remote)?;
        if let Some(session_id) = session_id {
            self.bus.publish(ChangeEvent::participants(session_id));
        }
        Ok(session_id.is_some())
    }

    pub async fn create_retro(&self, input: &CreateRetro) -> CoreResult<Retro> {
        RetroRepo::create(&self.pool, input)
            .await
            .map_err(CoreError::remote)
    }

    /// Delete a retro; its item rows cascade away in the store, so viewers
    /// of that retro are told both collections changed.
    pub async fn delete_retro(&self, id: DbId) -> CoreResult<bool> {
        let deleted = RetroRepo::delete(&self.pool, id)
            .await
            .map_err(CoreError::remote)?;
        if deleted {
            self.bus.publish(ChangeEvent::retro_items(id));
            self.bus.publish(ChangeEvent::action_items(id));
        }
        Ok(deleted)
    }

    pub async fn create_retro_item(&self, input: &CreateRetroItem) -> CoreResult<()> {
        let item = RetroItemRepo::create(&self.pool, input)
            .await
            .map_err(CoreError::remote)?;
        self.bus.publish(ChangeEvent::retro_items(item.retro_id));
        Ok(())
    }

    pub async fn create_action_item(&self, input: &CreateActionItem) -> CoreResult<()> {
        let item = ActionItemRepo::create(&self.pool, input)
            .await
            .map_err(CoreError::remote)?;
        self.bus.publish(ChangeEvent::action_items(item.retro_id));
        Ok(())
    }

    /// Insert a batch of retro items row by row, publishing one change event
    /// for the whole batch. The rows are not wrapped in a transaction; a
    /// mid-batch failure leaves the earlier rows in place.
    pub async fn insert_retro_items_batch(&self, items: &[CreateRetroItem]) -> CoreResult<()> {
        let mut retro_id = None;
        for item in items {
            let row = RetroItemRepo::create(&self.pool, item)
                .await
                .map_err(CoreError::remote)?;
            retro_id = Some(row.retro_id);
        }
        if let Some(retro_id) = retro_id {
            self.bus.publish(ChangeEvent::retro_items(retro_id));
        }
        Ok(())
    }

    /// Action-item counterpart of
    /// [`insert_retro_items_batch`](Self::insert_retro_items_batch), with the
    /// same non-transactional row-by-row behavior.
    pub async fn insert_action_items_batch(&self, items: &[CreateActionItem]) -> CoreResult<()> {
        let mut retro_id = None;
        for item in items {
            let row = ActionItemRepo::create(&self.pool, item)
                .await
                .map_err(CoreError::remote)?;
            retro_id = Some(row.retro_id);
        }
        if let Some(retro_id) = retro_id {
            self.bus.publish(ChangeEvent::action_items(retro_id));
        }
        Ok(())
    }

    pub async fn update_item_description(
        &self,
        kind: ItemKind,
        id: DbId,
        description: &str,
    ) -> CoreResult<()> {
        let retro_id = match kind {
            ItemKind::RetroItem => {
                RetroItemRepo::update_description(&self.pool, id, description).await
            }
            ItemKind::ActionItem => {
                ActionItemRepo::update_description(&self.pool, id, description).await
            }
        }
        .map_err(CoreError::remote)?;
        self.publish_item_change(kind, retro_id);
        Ok(())
    }

    /// Overwrite an item's vote count with a client-computed value. The
    /// store performs no increment of its own; whichever write lands last
    /// determines the count.
    pub async fn set_item_votes(&self, kind: ItemKind, id: DbId, votes: i64) -> CoreResult<()> {
        let retro_id = match kind {
            ItemKind::RetroItem => RetroItemRepo::set_votes(&self.pool, id, votes).await,
            ItemKind::ActionItem => ActionItemRepo::set_votes(&self.pool, id, votes).await,
        }
        .map_err(CoreError::remote)?;
        self.publish_item_change(kind, retro_id);
        Ok(())
    }

    pub async fn delete_item(&self, kind: ItemKind, id: DbId) -> CoreResult<()> {
        let retro_id = match kind {
            ItemKind::RetroItem => RetroItemRepo::delete(&self.pool, id).await,
            ItemKind::ActionItem => ActionItemRepo::delete(&self.pool, id).await,
        }
        .map_err(CoreError::remote)?;
        self.publish_item_change(kind, retro_id);
        Ok(())
    }

    /// Writes that matched no row (already-deleted items) publish nothing.
    fn publish_item_change(&self, kind: ItemKind, retro_id: Option<DbId>) {
        let Some(retro_id) = retro_id else { return };
        let event = match kind {
            ItemKind::RetroItem => ChangeEvent::retro_items(retro_id),
            ItemKind::ActionItem => ChangeEvent::action_items(retro_id),
        };
        self.bus.publish(event);
    }
}
