//! In-process change-notification bus backed by a `tokio::sync::broadcast`
//! channel.
//!
//! [`ChangeBus`] stands in for the backing store's changefeed: every
//! successful write publishes one [`ChangeEvent`] naming the table that
//! changed and the workspace or retro it belongs to. Clients on other event
//! loops (or in other tests) receive it and refetch. The payload carries no
//! row data by design; the refetch reads whatever is current.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use retroboard_core::types::DbId;

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

/// The tables a client can observe changes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeTable {
    RetroItems,
    ActionItems,
    Participants,
}

/// Server-side filter key: item tables are scoped per retro, the roster per
/// workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeScope {
    Retro(DbId),
    Session(DbId),
}

/// A row-level change notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub table: ChangeTable,
    pub scope: ChangeScope,

    /// When the change was published (UTC).
    pub occurred_at: DateTime<Utc>,
}

impl ChangeEvent {
    /// A `retro_items` change for the given retro.
    pub fn retro_items(retro_id: DbId) -> Self {
        Self::new(ChangeTable::RetroItems, ChangeScope::Retro(retro_id))
    }

    /// An `action_items` change for the given retro.
    pub fn action_items(retro_id: DbId) -> Self {
        Self::new(ChangeTable::ActionItems, ChangeScope::Retro(retro_id))
    }

    /// A `session_participants` change for the given workspace.
    pub fn participants(session_id: DbId) -> Self {
        Self::new(ChangeTable::Participants, ChangeScope::Session(session_id))
    }

    fn new(table: ChangeTable, scope: ChangeScope) -> Self {
        Self {
            table,
            scope,
            occurred_at: Utc::now(),
        }
    }

    /// `true` if this event belongs to the given retro's item collections.
    pub fn matches_retro(&self, retro_id: DbId) -> bool {
        self.scope == ChangeScope::Retro(retro_id)
    }

    /// `true` if this event belongs to the given workspace.
    pub fn matches_session(&self, session_id: DbId) -> bool {
        self.scope == ChangeScope::Session(session_id)
    }
}

// ---------------------------------------------------------------------------
// ChangeBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out bus for [`ChangeEvent`]s.
///
/// Shared via `Arc<ChangeBus>` between every client attached to the same
/// store; any number of subscribers independently receive every published
/// event.
pub struct ChangeBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`. Lagging is safe
    /// here: a missed notification only means a refetch happens one event
    /// later than it could have.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// nobody was watching the collection anyway.
    pub fn publish(&self, event: ChangeEvent) {
        tracing::debug!(table = ?event.table, scope = ?event.scope, "Publishing change event");
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus. Scope filtering is the
    /// subscriber's job.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = ChangeBus::default();
        let mut rx = bus.subscribe();

        let retro_id = Uuid::new_v4();
        bus.publish(ChangeEvent::retro_items(retro_id));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.table, ChangeTable::RetroItems);
        assert!(received.matches_retro(retro_id));
        assert!(!received.matches_retro(Uuid::new_v4()));
        assert!(!received.matches_session(retro_id));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = ChangeBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let session_id = Uuid::new_v4();
        bus.publish(ChangeEvent::participants(session_id));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert!(e1.matches_session(session_id));
        assert!(e2.matches_session(session_id));
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = ChangeBus::default();
        // No subscribers — this must not panic.
        bus.publish(ChangeEvent::action_items(Uuid::new_v4()));
    }

    #[tokio::test]
    async fn scope_distinguishes_retros() {
        let bus = ChangeBus::default();
        let mut rx = bus.subscribe();

        let mine = Uuid::new_v4();
        let other = Uuid::new_v4();
        bus.publish(ChangeEvent::retro_items(other));
        bus.publish(ChangeEvent::retro_items(mine));

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert!(!first.matches_retro(mine));
        assert!(second.matches_retro(mine));
    }
}
