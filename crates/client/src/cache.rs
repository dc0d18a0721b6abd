//! Local cached view of one retro's collections.
//!
//! The cache is only ever written by (a) a successful fetch response or
//! (b) an invalidation mark forcing the next read to refetch. No mutation
//! path edits cached rows directly; a user sees their own write after the
//! round-trip that follows invalidation. Overlapping refetches are
//! tolerated — the last response to land wins.

use std::sync::{Arc, Mutex};

use retroboard_core::error::CoreResult;
use retroboard_core::types::DbId;
use retroboard_db::models::item::{ActionItemWithAuthor, RetroItemWithAuthor};
use retroboard_db::models::participant::Participant;
use retroboard_events::ChangeTable;

use crate::gateway::RemoteGateway;

/// Freshness of one cached collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Freshness {
    /// Never fetched.
    #[default]
    Empty,
    /// Snapshot matches the last fetch.
    Fresh,
    /// Invalidated; the snapshot may be behind the store.
    Stale,
}

#[derive(Debug)]
struct Collection<T> {
    rows: Vec<T>,
    freshness: Freshness,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            freshness: Freshness::Empty,
        }
    }
}

impl<T: Clone> Collection<T> {
    fn fresh_rows(&self) -> Option<Vec<T>> {
        (self.freshness == Freshness::Fresh).then(|| self.rows.clone())
    }

    fn store(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.freshness = Freshness::Fresh;
    }

    fn invalidate(&mut self) {
        if self.freshness == Freshness::Fresh {
            self.freshness = Freshness::Stale;
        }
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    retro_items: Collection<RetroItemWithAuthor>,
    action_items: Collection<ActionItemWithAuthor>,
    participants: Collection<Participant>,
}

/// Shared cache for the active retro view. Cheap to clone.
#[derive(Clone, Default)]
pub struct BoardCache {
    inner: Arc<Mutex<CacheInner>>,
}

impl BoardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark one collection stale; the next read refetches it.
    pub fn invalidate(&self, table: ChangeTable) {
        let mut inner = self.lock();
        match table {
            ChangeTable::RetroItems => inner.retro_items.invalidate(),
            ChangeTable::ActionItems => inner.action_items.invalidate(),
            ChangeTable::Participants => inner.participants.invalidate(),
        }
    }

    /// Mark both item collections stale, the blanket invalidation every
    /// successful mutation performs.
    pub fn invalidate_items(&self) {
        let mut inner = self.lock();
        inner.retro_items.invalidate();
        inner.action_items.invalidate();
    }

    // -----------------------------------------------------------------------
    // Read-through accessors
    // -----------------------------------------------------------------------

    /// The retro item list, served from cache when fresh, refetched
    /// otherwise. A failed refetch leaves the cache untouched.
    pub async fn retro_items(
        &self,
        gateway: &RemoteGateway,
        retro_id: DbId,
    ) -> CoreResult<Vec<RetroItemWithAuthor>> {
        if let Some(rows) = self.lock().retro_items.fresh_rows() {
            return Ok(rows);
        }
        self.refresh_retro_items(gateway, retro_id).await
    }

    pub async fn action_items(
        &self,
        gateway: &RemoteGateway,
        retro_id: DbId,
    ) -> CoreResult<Vec<ActionItemWithAuthor>> {
        if let Some(rows) = self.lock().action_items.fresh_rows() {
            return Ok(rows);
        }
        self.refresh_action_items(gateway, retro_id).await
    }

    pub async fn participants(
        &self,
        gateway: &RemoteGateway,
        session_id: DbId,
    ) -> CoreResult<Vec<Participant>> {
        if let Some(rows) = self.lock().participants.fresh_rows() {
            return Ok(rows);
        }
        self.refresh_participants(gateway, session_id).await
    }

    // -----------------------------------------------------------------------
    // Forced refetches (used by the realtime synchronizer)
    // -----------------------------------------------------------------------

    pub async fn refresh_retro_items(
        &self,
        gateway: &RemoteGateway,
        retro_id: DbId,
    ) -> CoreResult<Vec<RetroItemWithAuthor>> {
        let rows = gateway.list_retro_items(retro_id).await?;
        self.lock().retro_items.store(rows.clone());
        Ok(rows)
    }

    pub async fn refresh_action_items(
        &self,
        gateway: &RemoteGateway,
        retro_id: DbId,
    ) -> CoreResult<Vec<ActionItemWithAuthor>> {
        let rows = gateway.list_action_items(retro_id).await?;
        self.lock().action_items.store(rows.clone());
        Ok(rows)
    }

    pub async fn refresh_participants(
        &self,
        gateway: &RemoteGateway,
        session_id: DbId,
    ) -> CoreResult<Vec<Participant>> {
        let rows = gateway.list_participants(session_id).await?;
        self.lock().participants.store(rows.clone());
        Ok(rows)
    }

    /// The cached retro item snapshot if it is fresh, without fetching.
    pub fn cached_retro_items(&self) -> Option<Vec<RetroItemWithAuthor>> {
        self.lock().retro_items.fresh_rows()
    }

    /// The cached action item snapshot if it is fresh, without fetching.
    pub fn cached_action_items(&self) -> Option<Vec<ActionItemWithAuthor>> {
        self.lock().action_items.fresh_rows()
    }

    /// The cached roster snapshot if it is fresh, without fetching.
    pub fn cached_participants(&self) -> Option<Vec<Participant>> {
        self.lock().participants.fresh_rows()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        self.inner.lock().expect("cache lock poisoned")
    }
}
