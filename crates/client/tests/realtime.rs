//! Integration tests for the standing change subscriptions:
//! - one client's mutation reaches another client's cache without polling
//!   the store
//! - events for other retros leave the cache alone
//! - a dropped subscription stops synchronizing

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use retroboard_client::cache::BoardCache;
use retroboard_client::gateway::RemoteGateway;
use retroboard_client::mutations::MutationEngine;
use retroboard_client::realtime::{RetroSubscription, WorkspaceSubscription};
use retroboard_core::columns::RetroColumn;
use retroboard_core::types::DbId;
use retroboard_db::models::participant::CreateParticipant;
use retroboard_db::models::retro::CreateRetro;
use retroboard_db::models::session::CreateSession;
use retroboard_events::ChangeBus;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Board {
    gateway: RemoteGateway,
    session_id: DbId,
    retro_id: DbId,
    participant_id: DbId,
}

async fn seed_board(pool: &SqlitePool) -> Board {
    // RUST_LOG controls verbosity when debugging a flaky subscription.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();

    let gateway = RemoteGateway::new(pool.clone(), Arc::new(ChangeBus::default()));

    let session = gateway
        .create_session(&CreateSession {
            name: "Team Apollo".into(),
            password: "hunter2".into(),
        })
        .await
        .unwrap();
    let participant = gateway
        .create_participant(&CreateParticipant {
            session_id: session.id,
            name: "Ada".into(),
        })
        .await
        .unwrap();
    let retro = gateway
        .create_retro(&CreateRetro {
            session_id: session.id,
            name: "Sprint 1".into(),
            retro_date: None,
        })
        .await
        .unwrap();

    Board {
        gateway,
        session_id: session.id,
        retro_id: retro.id,
        participant_id: participant.id,
    }
}

/// Wait until `probe` yields a value, checking the local cache snapshot
/// only (the store itself is never polled).
async fn wait_for<T>(mut probe: impl FnMut() -> Option<T>) -> T {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let Some(value) = probe() {
                return value;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("subscription did not synchronize in time")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn mutation_reaches_other_client_via_subscription(pool: SqlitePool) {
    let board = seed_board(&pool).await;

    // Client 2 shares the store (and thus its changefeed) via a gateway
    // clone, with its own cache.
    let viewer_cache = BoardCache::new();
    let _subscription = RetroSubscription::attach(
        board.gateway.clone(),
        viewer_cache.clone(),
        board.retro_id,
    );

    // Client 1 mutates.
    let writer = MutationEngine::new(
        board.gateway.clone(),
        BoardCache::new(),
        Some(board.retro_id),
        Some(board.participant_id),
    );
    writer
        .add_retro_item("Seen remotely", RetroColumn::Well)
        .await
        .unwrap();

    let items = wait_for(|| {
        viewer_cache
            .cached_retro_items()
            .filter(|items| !items.is_empty())
    })
    .await;
    assert_eq!(items[0].description, "Seen remotely");
}

#[sqlx::test(migrations = "../../migrations")]
async fn events_for_other_retros_leave_cache_alone(pool: SqlitePool) {
    let board = seed_board(&pool).await;
    let other_retro = board
        .gateway
        .create_retro(&CreateRetro {
            session_id: board.session_id,
            name: "Sprint 2".into(),
            retro_date: None,
        })
        .await
        .unwrap();

    let viewer_cache = BoardCache::new();
    let _subscription = RetroSubscription::attach(
        board.gateway.clone(),
        viewer_cache.clone(),
        board.retro_id,
    );

    // A write scoped to the other retro.
    let writer = MutationEngine::new(
        board.gateway.clone(),
        BoardCache::new(),
        Some(other_retro.id),
        Some(board.participant_id),
    );
    writer
        .add_retro_item("Elsewhere", RetroColumn::Well)
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    // Never fetched, never touched.
    assert!(viewer_cache.cached_retro_items().is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn dropped_subscription_stops_synchronizing(pool: SqlitePool) {
    let board = seed_board(&pool).await;
    let viewer_cache = BoardCache::new();

    let writer = MutationEngine::new(
        board.gateway.clone(),
        BoardCache::new(),
        Some(board.retro_id),
        Some(board.participant_id),
    );

    {
        let _subscription = RetroSubscription::attach(
            board.gateway.clone(),
            viewer_cache.clone(),
            board.retro_id,
        );
        writer
            .add_retro_item("First", RetroColumn::Well)
            .await
            .unwrap();
        wait_for(|| {
            viewer_cache
                .cached_retro_items()
                .filter(|items| items.len() == 1)
        })
        .await;
    }

    // Subscription dropped; further writes are not picked up.
    writer
        .add_retro_item("Second", RetroColumn::Well)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(viewer_cache.cached_retro_items().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn roster_subscription_tracks_joins_and_leaves(pool: SqlitePool) {
    let board = seed_board(&pool).await;
    let viewer_cache = BoardCache::new();
    let _subscription = WorkspaceSubscription::attach(
        board.gateway.clone(),
        viewer_cache.clone(),
        board.session_id,
    );

    let newcomer = board
        .gateway
        .create_participant(&CreateParticipant {
            session_id: board.session_id,
            name: "Grace".into(),
        })
        .await
        .unwrap();
    wait_for(|| {
        viewer_cache
            .cached_participants()
            .filter(|roster| roster.len() == 2)
    })
    .await;

    assert!(board.gateway.delete_participant(newcomer.id).await.unwrap());
    let roster = wait_for(|| {
        viewer_cache
            .cached_participants()
            .filter(|roster| roster.len() == 1)
    })
    .await;
    assert_eq!(roster[0].name, "Ada");
}
