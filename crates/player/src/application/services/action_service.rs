//! Action Sequencer - single-flight send and undo for one session
//!
//! Send shows the player's text immediately as a placeholder turn, submits
//! it, then re-fetches the newest page so the authoritative turns (the
//! player's and the narrator's) replace the placeholder. Undo reverts the
//! latest exchange on the server and rebuilds the timeline from a fresh
//! newest page. Only one of the two runs at a time; a second request while
//! one is pending is rejected with `Busy`, never queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use talekeeper_domain::common::non_blank;
use talekeeper_domain::{Language, PageEdge, PlaceholderId, SessionRef, Turn};

use super::in_flight::InFlight;
use super::journal_service::JournalService;
use super::pagination_service::PaginationController;
use crate::application::error::ServiceError;
use crate::ports::outbound::{ClockPort, SessionGatewayPort};
use crate::state::MessageStore;

/// Whether a send or undo is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequencerState {
    Idle,
    Pending,
}

pub struct ActionSequencer {
    session: SessionRef,
    gateway: Arc<dyn SessionGatewayPort>,
    clock: Arc<dyn ClockPort>,
    store: MessageStore,
    pagination: Arc<PaginationController>,
    journal: Arc<JournalService>,
    language: Language,
    pending: AtomicBool,
}

impl ActionSequencer {
    pub fn new(
        session: SessionRef,
        gateway: Arc<dyn SessionGatewayPort>,
        clock: Arc<dyn ClockPort>,
        store: MessageStore,
        pagination: Arc<PaginationController>,
        journal: Arc<JournalService>,
        language: Language,
    ) -> Self {
        Self {
            session,
            gateway,
            clock,
            store,
            pagination,
            journal,
            language,
            pending: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> SequencerState {
        if self.pending.load(Ordering::Acquire) {
            SequencerState::Pending
        } else {
            SequencerState::Idle
        }
    }

    /// Submit a player action.
    ///
    /// Leading and trailing whitespace is dropped before sending. If the
    /// action or the follow-up history fetch fails, or the returned future is
    /// dropped before it completes, the placeholder is withdrawn; turns the
    /// server did store appear with the next refresh.
    ///
    /// # Errors
    ///
    /// - `EmptyAction` if `text` is blank
    /// - `Busy` if a send or undo is pending
    /// - `Domain` (an `InvalidState` kind) if an unconfirmed placeholder is
    ///   still shown
    /// - `Network` if the server could not be reached
    pub async fn send(&self, text: &str) -> Result<(), ServiceError> {
        let text = non_blank(text).ok_or(ServiceError::EmptyAction)?;
        let _pending = InFlight::acquire(&self.pending).ok_or(ServiceError::Busy)?;

        let placeholder = Turn::placeholder(text, self.clock.now());
        let Some(placeholder_id) = placeholder.id.placeholder() else {
            return Err(ServiceError::InvalidState(
                "optimistic turn has a confirmed id".to_string(),
            ));
        };
        if self.store.insert_placeholder(placeholder)?.is_none() {
            return Ok(());
        }
        let shown = ShownPlaceholder::new(&self.store, placeholder_id);

        tracing::info!(session = %self.session, placeholder = %placeholder_id, "Submitting action");

        if let Err(e) = self
            .gateway
            .send_action(&self.session, text, self.language)
            .await
        {
            tracing::warn!(session = %self.session, error = %e, "Action failed");
            return Err(e.into());
        }

        let newest = self
            .gateway
            .history(&self.session, self.pagination.page_size(), 0)
            .await
            .map_err(|e| {
                tracing::warn!(
                    session = %self.session,
                    error = %e,
                    "Action accepted but history refresh failed"
                );
                e
            })?;

        match self.store.merge_page(newest, PageEdge::Newest) {
            Some(change) => {
                shown.confirm();
                tracing::info!(session = %self.session, added = change.added(), "Action confirmed")
            }
            None => {
                tracing::debug!(session = %self.session, "View closed, dropping action result");
                return Ok(());
            }
        }

        self.journal.refresh_or_keep().await;
        Ok(())
    }

    /// Revert the most recent exchange.
    ///
    /// On success the timeline holds exactly the server's newest page and
    /// pagination starts over from it.
    ///
    /// # Errors
    ///
    /// - `Busy` if a send or undo is pending
    /// - `NothingToUndo` if the timeline is empty
    /// - `UndoFailed` if the server refused or could not be reached; the
    ///   timeline is left untouched
    pub async fn undo(&self) -> Result<(), ServiceError> {
        let _pending = InFlight::acquire(&self.pending).ok_or(ServiceError::Busy)?;
        if self.store.is_empty() {
            return Err(ServiceError::NothingToUndo);
        }

        tracing::info!(session = %self.session, "Undoing last action");

        self.gateway.undo(&self.session).await.map_err(|e| {
            tracing::warn!(session = %self.session, error = %e, "Undo failed");
            ServiceError::UndoFailed(e)
        })?;

        let newest = self
            .gateway
            .history(&self.session, self.pagination.page_size(), 0)
            .await
            .map_err(|e| {
                tracing::warn!(session = %self.session, error = %e, "History refresh after undo failed");
                ServiceError::UndoFailed(e)
            })?;

        let len = newest.len();
        if self.store.replace(newest).is_none() {
            tracing::debug!(session = %self.session, "View closed, dropping undo result");
            return Ok(());
        }
        self.pagination.reset_from_page(len);
        tracing::info!(session = %self.session, turns = len, "Undo applied");

        self.journal.refresh_or_keep().await;
        Ok(())
    }
}

/// Withdraws an optimistic turn unless the send that showed it completes.
struct ShownPlaceholder<'a> {
    store: &'a MessageStore,
    id: Option<PlaceholderId>,
}

impl<'a> ShownPlaceholder<'a> {
    fn new(store: &'a MessageStore, id: PlaceholderId) -> Self {
        Self { store, id: Some(id) }
    }

    /// The authoritative page has superseded the placeholder.
    fn confirm(mut self) {
        self.id = None;
    }
}

impl Drop for ShownPlaceholder<'_> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            if self.store.discard_placeholder(id).is_some() {
                tracing::debug!(placeholder = %id, "Withdrew unconfirmed placeholder");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::testing::fixtures::{at, page, turn};
    use crate::application::error::ErrorKind;
    use crate::ports::outbound::{ApiError, MockSessionGatewayPort};
    use talekeeper_domain::{DomainError, Journal, Role, Timeline};

    fn sequencer(gateway: MockSessionGatewayPort, store: MessageStore) -> ActionSequencer {
        let gateway: Arc<dyn SessionGatewayPort> = Arc::new(gateway);
        let session = SessionRef::from(1);
        let pagination = Arc::new(PaginationController::new(
            session.clone(),
            Arc::clone(&gateway),
            store.clone(),
            20,
        ));
        pagination.reset_from_page(store.confirmed_len());
        let journal = Arc::new(JournalService::new(
            session.clone(),
            Arc::clone(&gateway),
            Journal::default(),
        ));
        ActionSequencer::new(
            session,
            gateway,
            Arc::new(FixedClock(at(100))),
            store,
            pagination,
            journal,
            Language::En,
        )
    }

    #[tokio::test]
    async fn send_replaces_placeholder_with_server_turns() {
        let store = MessageStore::new();
        let mut gateway = MockSessionGatewayPort::new();
        gateway
            .expect_send_action()
            .withf(|_, text, language| text == "open door" && *language == Language::En)
            .times(1)
            .returning(|_, _, _| Ok(()));
        gateway.expect_history().times(1).returning(|_, _, _| {
            Ok(vec![
                Turn::confirmed(1, Role::User, "open door", at(101)),
                Turn::confirmed(2, Role::Narrator, "The door creaks open.", at(101)),
            ])
        });
        gateway.expect_journal().returning(|_| Ok(Vec::new()));

        let sequencer = sequencer(gateway, store.clone());
        sequencer.send("  open door ").await.unwrap();

        let turns = store.snapshot();
        assert_eq!(turns.len(), 2);
        assert!(store.placeholder().is_none());
        assert_eq!(turns[0].content, "open door");
        assert_eq!(turns[1].role, Role::Narrator);
        assert_eq!(sequencer.state(), SequencerState::Idle);
    }

    #[tokio::test]
    async fn failed_send_withdraws_placeholder() {
        let store = MessageStore::from_timeline(Timeline::from_page(page(1..=4)));
        let mut gateway = MockSessionGatewayPort::new();
        gateway
            .expect_send_action()
            .returning(|_, _, _| Err(ApiError::RequestFailed("connection refused".into())));
        gateway.expect_history().times(0);

        let sequencer = sequencer(gateway, store.clone());
        let err = sequencer.send("look around").await.unwrap_err();

        assert!(matches!(err, ServiceError::Network(_)));
        assert_eq!(store.snapshot(), page(1..=4));
        assert_eq!(sequencer.state(), SequencerState::Idle);
    }

    #[tokio::test]
    async fn failed_refresh_withdraws_placeholder() {
        let store = MessageStore::from_timeline(Timeline::from_page(page(1..=4)));
        let mut gateway = MockSessionGatewayPort::new();
        gateway.expect_send_action().returning(|_, _, _| Ok(()));
        gateway
            .expect_history()
            .returning(|_, _, _| Err(ApiError::Timeout));

        let sequencer = sequencer(gateway, store.clone());
        assert!(sequencer.send("look around").await.is_err());
        assert!(store.placeholder().is_none());
    }

    #[tokio::test]
    async fn outstanding_placeholder_blocks_send() {
        let store = MessageStore::from_timeline(Timeline::from_page(page(1..=2)));
        store
            .insert_placeholder(Turn::placeholder("still waiting", at(50)))
            .unwrap();
        let mut gateway = MockSessionGatewayPort::new();
        gateway.expect_send_action().times(0);

        let sequencer = sequencer(gateway, store.clone());
        let err = sequencer.send("look around").await.unwrap_err();

        assert!(matches!(err, ServiceError::Domain(DomainError::InvalidState(_))));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(err.to_string().matches("Invalid state").count(), 1);
        // The earlier placeholder is not ours to withdraw
        assert!(store.placeholder().is_some());
        assert_eq!(sequencer.state(), SequencerState::Idle);
    }

    #[tokio::test]
    async fn blank_action_is_rejected_without_a_request() {
        let mut gateway = MockSessionGatewayPort::new();
        gateway.expect_send_action().times(0);

        let sequencer = sequencer(gateway, MessageStore::new());
        assert!(matches!(
            sequencer.send("   ").await,
            Err(ServiceError::EmptyAction)
        ));
    }

    #[tokio::test]
    async fn undo_replaces_timeline_with_newest_page() {
        let store = MessageStore::from_timeline(Timeline::from_page(page(1..=10)));
        let mut gateway = MockSessionGatewayPort::new();
        gateway.expect_undo().times(1).returning(|_| Ok(()));
        gateway
            .expect_history()
            .times(1)
            .returning(|_, _, _| Ok(page(1..=8)));
        gateway.expect_journal().returning(|_| Ok(Vec::new()));

        let sequencer = sequencer(gateway, store.clone());
        sequencer.undo().await.unwrap();

        assert_eq!(store.snapshot(), page(1..=8));
        assert!(!sequencer.pagination.has_more());
    }

    #[tokio::test]
    async fn undo_on_empty_timeline_is_rejected() {
        let mut gateway = MockSessionGatewayPort::new();
        gateway.expect_undo().times(0);

        let sequencer = sequencer(gateway, MessageStore::new());
        assert!(matches!(
            sequencer.undo().await,
            Err(ServiceError::NothingToUndo)
        ));
    }

    #[tokio::test]
    async fn refused_undo_leaves_timeline_untouched() {
        let store = MessageStore::from_timeline(Timeline::from_page(vec![turn(1)]));
        let mut gateway = MockSessionGatewayPort::new();
        gateway
            .expect_undo()
            .returning(|_| Err(ApiError::http(400, "No moves to undo")));

        let sequencer = sequencer(gateway, store.clone());
        let err = sequencer.undo().await.unwrap_err();

        assert!(matches!(err, ServiceError::UndoFailed(_)));
        assert_eq!(store.len(), 1);
    }
}
