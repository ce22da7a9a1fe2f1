//! Session View - everything the player sees and does within one session
//!
//! Opening a view fetches the session record, the newest history page and
//! the journal concurrently. The view owns the message store, the
//! pagination controller and the action sequencer; closing (or dropping) it
//! freezes the store so responses that arrive later change nothing.

use std::sync::Arc;

use futures_channel::mpsc;
use talekeeper_domain::{Journal, SessionInfo, SessionRef, Timeline, TimelineChange, Turn};

use super::action_service::{ActionSequencer, SequencerState};
use super::journal_service::JournalService;
use super::pagination_service::PaginationController;
use crate::application::error::ServiceError;
use crate::config::PlayerConfig;
use crate::ports::outbound::{ClockPort, SessionGatewayPort};
use crate::state::MessageStore;

pub struct SessionView {
    info: SessionInfo,
    store: MessageStore,
    pagination: Arc<PaginationController>,
    sequencer: ActionSequencer,
    journal: Arc<JournalService>,
}

impl SessionView {
    /// Load a session and build its view.
    ///
    /// A journal that fails to load is treated as empty; a failure to load
    /// the session or its history fails the whole open.
    pub async fn open(
        session: SessionRef,
        gateway: Arc<dyn SessionGatewayPort>,
        clock: Arc<dyn ClockPort>,
        config: &PlayerConfig,
    ) -> Result<Self, ServiceError> {
        let page_size = config.page_size.max(1);

        let (info, history, journal) = futures_util::join!(
            gateway.session(&session),
            gateway.history(&session, page_size, 0),
            gateway.journal(&session),
        );
        let info = info?;
        let history = history?;
        let journal = journal.unwrap_or_else(|e| {
            tracing::warn!(session = %session, error = %e, "Journal unavailable, starting empty");
            Vec::new()
        });

        let loaded = history.len();
        let store = MessageStore::from_timeline(Timeline::from_page(history));
        let pagination = Arc::new(PaginationController::new(
            session.clone(),
            Arc::clone(&gateway),
            store.clone(),
            page_size,
        ));
        pagination.reset_from_page(loaded);

        let journal = Arc::new(JournalService::new(
            session.clone(),
            Arc::clone(&gateway),
            Journal::new(journal),
        ));
        let sequencer = ActionSequencer::new(
            session.clone(),
            gateway,
            clock,
            store.clone(),
            Arc::clone(&pagination),
            Arc::clone(&journal),
            config.language,
        );

        tracing::info!(
            session = %session,
            turns = loaded,
            has_more = pagination.has_more(),
            "Session view opened"
        );

        Ok(Self {
            info,
            store,
            pagination,
            sequencer,
            journal,
        })
    }

    pub fn info(&self) -> &SessionInfo {
        &self.info
    }

    pub fn session(&self) -> &SessionRef {
        &self.info.id
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// See [`ActionSequencer::send`]. A closed view accepts and ignores the call.
    pub async fn send(&self, text: &str) -> Result<(), ServiceError> {
        if !self.is_open() {
            return Ok(());
        }
        self.sequencer.send(text).await
    }

    /// See [`ActionSequencer::undo`]. A closed view accepts and ignores the call.
    pub async fn undo(&self) -> Result<(), ServiceError> {
        if !self.is_open() {
            return Ok(());
        }
        self.sequencer.undo().await
    }

    /// See [`PaginationController::load_older`].
    pub async fn load_older(&self) -> Result<usize, ServiceError> {
        if !self.is_open() {
            return Ok(0);
        }
        self.pagination.load_older().await
    }

    pub async fn refresh_journal(&self) -> Result<Journal, ServiceError> {
        Ok(self.journal.refresh().await?)
    }

    // =========================================================================
    // Observation
    // =========================================================================

    pub fn timeline(&self) -> Vec<Turn> {
        self.store.snapshot()
    }

    pub fn has_more(&self) -> bool {
        self.pagination.has_more()
    }

    pub fn journal(&self) -> Journal {
        self.journal.journal()
    }

    pub fn state(&self) -> SequencerState {
        self.sequencer.state()
    }

    /// Register a change callback. It runs while the timeline is locked and
    /// must not call back into this view; use [`Self::watch`] for that.
    pub fn subscribe(&self, callback: impl FnMut(TimelineChange) + Send + 'static) {
        self.store.subscribe(callback);
    }

    pub fn watch(&self) -> mpsc::UnboundedReceiver<TimelineChange> {
        self.store.watch()
    }

    pub fn is_open(&self) -> bool {
        self.store.is_open()
    }

    /// Stop applying results. Idempotent.
    pub fn close(&self) {
        if self.store.is_open() {
            tracing::info!(session = %self.info.id, "Session view closed");
        }
        self.store.close();
    }
}

impl Drop for SessionView {
    fn drop(&mut self) {
        self.store.close();
    }
}
