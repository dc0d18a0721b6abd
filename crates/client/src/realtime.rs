//! Standing change subscriptions.
//!
//! Each subscription spawns a task that listens on the store's changefeed,
//! filters events down to one retro (or one workspace), and reacts to a
//! match by invalidating the affected collection and refetching it. The
//! payload is never inspected beyond table and scope; the refetch reads
//! whatever is current, so stale or reordered notifications converge on the
//! same state. Dropping the subscription detaches the listener.

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use retroboard_core::types::DbId;
use retroboard_events::ChangeTable;

use crate::cache::BoardCache;
use crate::gateway::RemoteGateway;

/// Subscription to one retro's item collections.
pub struct RetroSubscription {
    task: JoinHandle<()>,
}

impl RetroSubscription {
    /// Attach to the gateway's changefeed and keep `cache` synchronized
    /// with the given retro until dropped.
    pub fn attach(gateway: RemoteGateway, cache: BoardCache, retro_id: DbId) -> Self {
        let mut rx = gateway.bus().subscribe();
        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) if event.matches_retro(retro_id) => {
                        cache.invalidate(event.table);
                        let result = match event.table {
                            ChangeTable::RetroItems => cache
                                .refresh_retro_items(&gateway, retro_id)
                                .await
                                .map(drop),
                            ChangeTable::ActionItems => cache
                                .refresh_action_items(&gateway, retro_id)
                                .await
                                .map(drop),
                            ChangeTable::Participants => Ok(()),
                        };
                        if let Err(err) = result {
                            // Stay stale until the next event or read-through.
                            tracing::warn!(%retro_id, %err, "Refetch after change event failed");
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(%retro_id, skipped, "Change stream lagged; refetching both collections");
                        cache.invalidate_items();
                        if let Err(err) = cache.refresh_retro_items(&gateway, retro_id).await {
                            tracing::warn!(%retro_id, %err, "Refetch after lag failed");
                        }
                        if let Err(err) = cache.refresh_action_items(&gateway, retro_id).await {
                            tracing::warn!(%retro_id, %err, "Refetch after lag failed");
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        Self { task }
    }
}

impl Drop for RetroSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Subscription to one workspace's participant roster.
pub struct WorkspaceSubscription {
    task: JoinHandle<()>,
}

impl WorkspaceSubscription {
    /// Attach to the gateway's changefeed and keep the cached roster
    /// synchronized with the given workspace until dropped.
    pub fn attach(gateway: RemoteGateway, cache: BoardCache, session_id: DbId) -> Self {
        let mut rx = gateway.bus().subscribe();
        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event)
                        if event.table == ChangeTable::Participants
                            && event.matches_session(session_id) =>
                    {
                        cache.invalidate(ChangeTable::Participants);
                        if let Err(err) = cache.refresh_participants(&gateway, session_id).await {
                            tracing::warn!(%session_id, %err, "Roster refetch failed");
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(%session_id, skipped, "Change stream lagged; refetching roster");
                        cache.invalidate(ChangeTable::Participants);
                        if let Err(err) = cache.refresh_participants(&gateway, session_id).await {
                            tracing::warn!(%session_id, %err, "Roster refetch after lag failed");
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        Self { task }
    }
}

impl Drop for WorkspaceSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
