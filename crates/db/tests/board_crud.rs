//! Integration tests for the repository layer against a real database:
//! - workspace -> participant -> retro -> item hierarchy
//! - item ordering (votes desc, creation time asc tie-break)
//! - cascade delete of retros
//! - participant deletion leaving anonymous items

use retroboard_core::columns::RetroColumn;
use retroboard_db::models::item::{CreateActionItem, CreateRetroItem};
use retroboard_db::models::participant::CreateParticipant;
use retroboard_db::models::retro::CreateRetro;
use retroboard_db::models::session::CreateSession;
use retroboard_db::repositories::{
    ActionItemRepo, ParticipantRepo, RetroItemRepo, RetroRepo, SessionRepo,
};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_retro(
    pool: &SqlitePool,
) -> (
    retroboard_db::models::session::Session,
    retroboard_db::models::participant::Participant,
    retroboard_db::models::retro::Retro,
) {
    let session = SessionRepo::create(
        pool,
        &CreateSession {
            name: "Team Apollo".into(),
            password: "hunter2".into(),
        },
    )
    .await
    .unwrap();

    let participant = ParticipantRepo::create(
        pool,
        &CreateParticipant {
            session_id: session.id,
            name: "Ada".into(),
        },
    )
    .await
    .unwrap();

    let retro = RetroRepo::create(
        pool,
        &CreateRetro {
            session_id: session.id,
            name: "Sprint 1".into(),
            retro_date: None,
        },
    )
    .await
    .unwrap();

    (session, participant, retro)
}

fn new_item(
    retro_id: retroboard_core::types::DbId,
    participant_id: retroboard_core::types::DbId,
    description: &str,
    votes: i64,
) -> CreateRetroItem {
    CreateRetroItem {
        retro_id,
        participant_id: Some(participant_id),
        description: description.into(),
        votes,
        column_type: RetroColumn::Well,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn create_full_hierarchy(pool: SqlitePool) {
    let (session, participant, retro) = seed_retro(&pool).await;

    assert_eq!(participant.session_id, session.id);
    assert_eq!(retro.session_id, session.id);

    let item = RetroItemRepo::create(&pool, &new_item(retro.id, participant.id, "went well", 0))
        .await
        .unwrap();
    assert_eq!(item.retro_id, retro.id);
    assert_eq!(item.votes, 0);
    assert_eq!(item.column_type, "well");

    let action = ActionItemRepo::create(
        &pool,
        &CreateActionItem {
            retro_id: retro.id,
            participant_id: Some(participant.id),
            description: "follow up".into(),
            votes: 0,
        },
    )
    .await
    .unwrap();
    assert_eq!(action.retro_id, retro.id);

    let items = RetroItemRepo::list_for_retro(&pool, retro.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].author_name.as_deref(), Some("Ada"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn items_ordered_by_votes_desc_then_created_asc(pool: SqlitePool) {
    let (_, participant, retro) = seed_retro(&pool).await;

    // Created in order A, B, C, D with votes 5, 3, 5, 1.
    for (name, votes) in [("A", 5), ("B", 3), ("C", 5), ("D", 1)] {
        RetroItemRepo::create(&pool, &new_item(retro.id, participant.id, name, votes))
            .await
            .unwrap();
    }

    let items = RetroItemRepo::list_for_retro(&pool, retro.id).await.unwrap();
    let order: Vec<&str> = items.iter().map(|i| i.description.as_str()).collect();
    assert_eq!(order, ["A", "C", "B", "D"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn action_items_share_the_same_ordering(pool: SqlitePool) {
    let (_, participant, retro) = seed_retro(&pool).await;

    for (name, votes) in [("A", 2), ("B", 4), ("C", 2)] {
        ActionItemRepo::create(
            &pool,
            &CreateActionItem {
                retro_id: retro.id,
                participant_id: Some(participant.id),
                description: name.into(),
                votes,
            },
        )
        .await
        .unwrap();
    }

    let items = ActionItemRepo::list_for_retro(&pool, retro.id).await.unwrap();
    let order: Vec<&str> = items.iter().map(|i| i.description.as_str()).collect();
    assert_eq!(order, ["B", "A", "C"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn deleting_retro_cascades_to_items(pool: SqlitePool) {
    let (_, participant, retro) = seed_retro(&pool).await;

    RetroItemRepo::create(&pool, &new_item(retro.id, participant.id, "orphan?", 0))
        .await
        .unwrap();

    assert!(RetroRepo::delete(&pool, retro.id).await.unwrap());
    assert!(RetroRepo::find_by_id(&pool, retro.id).await.unwrap().is_none());

    let items = RetroItemRepo::list_for_retro(&pool, retro.id).await.unwrap();
    assert!(items.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn deleting_participant_leaves_anonymous_items(pool: SqlitePool) {
    let (session, participant, retro) = seed_retro(&pool).await;

    let item = RetroItemRepo::create(&pool, &new_item(retro.id, participant.id, "keep me", 1))
        .await
        .unwrap();

    let deleted_from = ParticipantRepo::delete(&pool, participant.id).await.unwrap();
    assert_eq!(deleted_from, Some(session.id));

    let items = RetroItemRepo::list_for_retro(&pool, retro.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, item.id);
    assert_eq!(items[0].participant_id, None);
    assert_eq!(items[0].author_name, None);
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_and_delete_return_owning_retro(pool: SqlitePool) {
    let (_, participant, retro) = seed_retro(&pool).await;

    let item = RetroItemRepo::create(&pool, &new_item(retro.id, participant.id, "draft", 0))
        .await
        .unwrap();

    let touched = RetroItemRepo::update_description(&pool, item.id, "final")
        .await
        .unwrap();
    assert_eq!(touched, Some(retro.id));

    let touched = RetroItemRepo::set_votes(&pool, item.id, 7).await.unwrap();
    assert_eq!(touched, Some(retro.id));

    let items = RetroItemRepo::list_for_retro(&pool, retro.id).await.unwrap();
    assert_eq!(items[0].description, "final");
    assert_eq!(items[0].votes, 7);

    let touched = RetroItemRepo::delete(&pool, item.id).await.unwrap();
    assert_eq!(touched, Some(retro.id));

    // A second delete targets nothing.
    let touched = RetroItemRepo::delete(&pool, item.id).await.unwrap();
    assert_eq!(touched, None);
}

#[sqlx::test(migrations = "../../migrations")]
async fn session_lookup_by_name(pool: SqlitePool) {
    let (session, _, _) = seed_retro(&pool).await;

    let found = SessionRepo::find_by_name(&pool, "Team Apollo").await.unwrap();
    assert_eq!(found.map(|s| s.id), Some(session.id));

    let missing = SessionRepo::find_by_name(&pool, "Team Artemis").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn retros_listed_newest_first(pool: SqlitePool) {
    let (session, _, first) = seed_retro(&pool).await;

    let second = RetroRepo::create(
        &pool,
        &CreateRetro {
            session_id: session.id,
            name: "Sprint 2".into(),
            retro_date: None,
        },
    )
    .await
    .unwrap();

    let retros = RetroRepo::list_for_session(&pool, session.id).await.unwrap();
    let ids: Vec<_> = retros.iter().map(|r| r.id).collect();
    assert_eq!(ids, [second.id, first.id]);
}
