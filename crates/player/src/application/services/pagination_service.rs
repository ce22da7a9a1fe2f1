//! Pagination Controller - backward paging through a session's history
//!
//! Older pages are requested at an offset equal to the number of confirmed
//! turns already held, so turns appended by actions since the last page
//! never cause a gap or a duplicate fetch. At most one page load runs at a
//! time.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use talekeeper_domain::{PageCursor, PageEdge, SessionRef};

use super::in_flight::InFlight;
use crate::application::error::ServiceError;
use crate::ports::outbound::SessionGatewayPort;
use crate::state::MessageStore;

pub struct PaginationController {
    session: SessionRef,
    gateway: Arc<dyn SessionGatewayPort>,
    store: MessageStore,
    cursor: Mutex<PageCursor>,
    loading: AtomicBool,
}

impl PaginationController {
    pub fn new(
        session: SessionRef,
        gateway: Arc<dyn SessionGatewayPort>,
        store: MessageStore,
        page_size: usize,
    ) -> Self {
        Self {
            session,
            gateway,
            store,
            cursor: Mutex::new(PageCursor::initial(page_size)),
            loading: AtomicBool::new(false),
        }
    }

    fn cursor_mut(&self) -> MutexGuard<'_, PageCursor> {
        self.cursor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn cursor(&self) -> PageCursor {
        *self.cursor_mut()
    }

    pub fn has_more(&self) -> bool {
        self.cursor().has_more()
    }

    pub fn page_size(&self) -> usize {
        self.cursor().limit()
    }

    /// Start over after the timeline was rebuilt from a newest page of `len` turns.
    pub fn reset_from_page(&self, len: usize) {
        self.cursor_mut().reset_from_page(len);
    }

    /// Fetch the next older page and merge it.
    ///
    /// Returns the number of turns that became visible. `Ok(0)` when history
    /// is exhausted, when the request failed (logged, `has_more` unchanged) or
    /// when the page no longer applies because the view was closed or the
    /// timeline replaced meanwhile.
    ///
    /// # Errors
    ///
    /// `ServiceError::Busy` if another page load is in flight.
    pub async fn load_older(&self) -> Result<usize, ServiceError> {
        if !self.has_more() {
            return Ok(0);
        }
        let _loading = InFlight::acquire(&self.loading).ok_or(ServiceError::Busy)?;

        let generation = self.store.generation();
        let offset = self.store.confirmed_len();
        let limit = self.page_size();

        let page = match self.gateway.history(&self.session, limit, offset).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    session = %self.session,
                    offset,
                    limit,
                    error = %e,
                    "Failed to load older history"
                );
                return Ok(0);
            }
        };

        let len = page.len();
        let Some(change) = self.store.merge_page_at(generation, page, PageEdge::Oldest) else {
            tracing::debug!(session = %self.session, offset, "Discarding stale history page");
            return Ok(0);
        };

        let mut cursor = self.cursor_mut();
        cursor.record_page(offset, len);
        tracing::debug!(
            session = %self.session,
            offset,
            fetched = len,
            added = change.added(),
            has_more = cursor.has_more(),
            "Loaded older history"
        );

        Ok(change.added())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::fixtures::page;
    use crate::ports::outbound::{ApiError, MockSessionGatewayPort};
    use mockall::predicate::eq;
    use talekeeper_domain::Timeline;

    fn controller(gateway: MockSessionGatewayPort, store: MessageStore) -> PaginationController {
        let controller =
            PaginationController::new(SessionRef::from(1), Arc::new(gateway), store.clone(), 20);
        controller.reset_from_page(store.confirmed_len());
        controller
    }

    #[tokio::test]
    async fn short_page_exhausts_history() {
        let store = MessageStore::from_timeline(Timeline::from_page(page(16..=35)));
        let mut gateway = MockSessionGatewayPort::new();
        gateway
            .expect_history()
            .with(eq(SessionRef::from(1)), eq(20), eq(20))
            .times(1)
            .returning(|_, _, _| Ok(page(1..=15)));

        let pagination = controller(gateway, store.clone());
        let added = pagination.load_older().await.unwrap();

        assert_eq!(added, 15);
        assert_eq!(store.len(), 35);
        assert!(!pagination.has_more());
        assert_eq!(pagination.cursor().offset(), 35);
    }

    #[tokio::test]
    async fn exhausted_history_makes_no_request() {
        let store = MessageStore::from_timeline(Timeline::from_page(page(1..=5)));
        let mut gateway = MockSessionGatewayPort::new();
        gateway.expect_history().times(0);

        let pagination = controller(gateway, store);
        assert!(!pagination.has_more());
        assert_eq!(pagination.load_older().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_load_keeps_has_more() {
        let store = MessageStore::from_timeline(Timeline::from_page(page(21..=40)));
        let mut gateway = MockSessionGatewayPort::new();
        gateway
            .expect_history()
            .times(1)
            .returning(|_, _, _| Err(ApiError::Timeout));

        let pagination = controller(gateway, store.clone());
        assert_eq!(pagination.load_older().await.unwrap(), 0);
        assert!(pagination.has_more());
        assert_eq!(store.len(), 20);
    }

    #[tokio::test]
    async fn full_page_keeps_paging() {
        let store = MessageStore::from_timeline(Timeline::from_page(page(41..=60)));
        let mut gateway = MockSessionGatewayPort::new();
        gateway
            .expect_history()
            .with(eq(SessionRef::from(1)), eq(20), eq(20))
            .times(1)
            .returning(|_, _, _| Ok(page(21..=40)));

        let pagination = controller(gateway, store.clone());
        assert_eq!(pagination.load_older().await.unwrap(), 20);
        assert!(pagination.has_more());
    }

    #[tokio::test]
    async fn closed_store_discards_page() {
        let store = MessageStore::from_timeline(Timeline::from_page(page(21..=40)));
        let mut gateway = MockSessionGatewayPort::new();
        gateway
            .expect_history()
            .returning(|_, _, _| Ok(page(1..=20)));

        let pagination = controller(gateway, store.clone());
        store.close();

        assert_eq!(pagination.load_older().await.unwrap(), 0);
        assert_eq!(store.len(), 20);
        assert_eq!(pagination.cursor().offset(), 20);
    }
}
