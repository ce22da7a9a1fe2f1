//! Send, paging and undo flows.

use talekeeper_domain::Role;

use super::e2e_helpers::{confirmed_ids, Harness};
use crate::application::error::ServiceError;
use crate::infrastructure::testing::GatewayCall;
use crate::ports::outbound::ApiError;

#[tokio::test]
async fn first_action_shows_player_and_narrator_turns() {
    let harness = Harness::with_turns(0);
    let view = harness.open().await;
    assert!(view.timeline().is_empty());
    assert!(!view.has_more());

    view.send("open door").await.unwrap();

    let timeline = view.timeline();
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0].role, Role::User);
    assert_eq!(timeline[0].content, "open door");
    assert_eq!(timeline[1].role, Role::Narrator);
    assert!(timeline.iter().all(|t| !t.is_placeholder()));
}

#[tokio::test]
async fn paging_back_to_the_start_of_history() {
    let harness = Harness::with_turns(35);
    let view = harness.open().await;
    assert_eq!(view.timeline().len(), 20);
    assert!(view.has_more());

    assert_eq!(view.load_older().await.unwrap(), 15);
    assert_eq!(view.timeline().len(), 35);
    assert!(!view.has_more());

    assert_eq!(view.load_older().await.unwrap(), 0);
    assert_eq!(harness.server.history_calls(), vec![(20, 0), (20, 20)]);
    assert_eq!(view.timeline(), harness.server_turns());
}

#[tokio::test]
async fn exact_page_boundary_needs_one_empty_page() {
    let harness = Harness::with_turns(40);
    let view = harness.open().await;

    assert_eq!(view.load_older().await.unwrap(), 20);
    assert!(view.has_more());
    assert_eq!(view.load_older().await.unwrap(), 0);
    assert!(!view.has_more());
    assert_eq!(view.timeline().len(), 40);
}

#[tokio::test]
async fn paging_after_actions_skips_turns_already_shown() {
    let harness = Harness::with_turns(40);
    let view = harness.open().await;

    view.send("light the torch").await.unwrap();
    assert_eq!(view.timeline().len(), 22);

    assert_eq!(view.load_older().await.unwrap(), 20);
    assert_eq!(harness.server.history_calls().last(), Some(&(20, 22)));
    assert_eq!(view.timeline(), harness.server_turns());
}

#[tokio::test]
async fn undo_rebuilds_timeline_from_newest_page() {
    let harness = Harness::with_turns(10);
    let view = harness.open().await;

    view.undo().await.unwrap();

    assert_eq!(view.timeline().len(), 8);
    assert_eq!(confirmed_ids(&view.timeline()), (1..=8).collect::<Vec<_>>());
    assert!(!view.has_more());
}

#[tokio::test]
async fn undo_after_deep_paging_restarts_pagination() {
    let harness = Harness::with_turns(45);
    let view = harness.open().await;
    view.load_older().await.unwrap();
    assert_eq!(view.timeline().len(), 40);

    view.undo().await.unwrap();

    // Only the newest page survives an undo
    assert_eq!(view.timeline().len(), 20);
    assert!(view.has_more());

    assert_eq!(view.load_older().await.unwrap(), 20);
    assert_eq!(harness.server.history_calls().last(), Some(&(20, 20)));
    assert_eq!(view.timeline().len(), 40);
}

#[tokio::test]
async fn failed_action_is_withdrawn_and_can_be_retried() {
    let harness = Harness::with_turns(4);
    let view = harness.open().await;
    harness
        .server
        .fail_next(GatewayCall::Action, ApiError::RequestFailed("connection reset".into()));

    let err = view.send("open door").await.unwrap_err();
    assert!(matches!(err, ServiceError::Network(_)));
    assert_eq!(view.timeline().len(), 4);

    view.send("open door").await.unwrap();
    assert_eq!(view.timeline().len(), 6);
}

#[tokio::test]
async fn refused_undo_changes_nothing() {
    let harness = Harness::with_turns(4);
    let view = harness.open().await;
    let before = view.timeline();
    harness
        .server
        .fail_next(GatewayCall::Undo, ApiError::http(400, "No moves to undo"));

    let err = view.undo().await.unwrap_err();
    assert!(matches!(err, ServiceError::UndoFailed(_)));
    assert_eq!(view.timeline(), before);
}

#[tokio::test]
async fn failed_page_load_can_be_retried() {
    let harness = Harness::with_turns(30);
    let view = harness.open().await;
    harness.server.fail_next(GatewayCall::History, ApiError::Timeout);

    assert_eq!(view.load_older().await.unwrap(), 0);
    assert!(view.has_more());

    assert_eq!(view.load_older().await.unwrap(), 10);
    assert_eq!(view.timeline().len(), 30);
}

#[tokio::test]
async fn journal_is_refreshed_after_an_action() {
    let harness = Harness::with_turns(2);
    let view = harness.open().await;
    harness.server.add_journal_entry(
        &harness.session,
        talekeeper_domain::JournalKind::Character,
        "The innkeeper",
    );
    assert!(view.journal().is_empty());

    view.send("talk to the innkeeper").await.unwrap();
    assert_eq!(view.journal().characters().count(), 1);
}
