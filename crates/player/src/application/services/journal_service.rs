//! Journal service - the session's quest, character and lore notes

use std::sync::{Arc, Mutex, PoisonError};

use talekeeper_domain::{Journal, SessionRef};

use crate::ports::outbound::{ApiError, SessionGatewayPort};

/// Caches the last journal fetched for one session.
pub struct JournalService {
    session: SessionRef,
    gateway: Arc<dyn SessionGatewayPort>,
    journal: Mutex<Journal>,
}

impl JournalService {
    pub fn new(session: SessionRef, gateway: Arc<dyn SessionGatewayPort>, journal: Journal) -> Self {
        Self {
            session,
            gateway,
            journal: Mutex::new(journal),
        }
    }

    /// Last fetched journal
    pub fn journal(&self) -> Journal {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetch the journal and replace the cached copy.
    ///
    /// On failure the cached copy is left untouched.
    pub async fn refresh(&self) -> Result<Journal, ApiError> {
        let journal = Journal::new(self.gateway.journal(&self.session).await?);
        *self.journal.lock().unwrap_or_else(PoisonError::into_inner) = journal.clone();
        Ok(journal)
    }

    /// Refresh, logging instead of failing. Used after send and undo, where
    /// the timeline result matters and the journal is secondary.
    pub async fn refresh_or_keep(&self) {
        if let Err(e) = self.refresh().await {
            tracing::warn!(session = %self.session, error = %e, "Journal refresh failed, keeping previous entries");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::fixtures::at;
    use crate::ports::outbound::MockSessionGatewayPort;
    use talekeeper_domain::{JournalEntry, JournalKind};

    fn entry(id: i64, kind: JournalKind) -> JournalEntry {
        JournalEntry {
            id,
            kind,
            title: format!("entry {}", id),
            content: String::new(),
            created_at: at(id),
        }
    }

    #[tokio::test]
    async fn refresh_replaces_cached_journal() {
        let mut gateway = MockSessionGatewayPort::new();
        gateway
            .expect_journal()
            .times(1)
            .returning(|_| Ok(vec![entry(1, JournalKind::Quest), entry(2, JournalKind::Lore)]));

        let service = JournalService::new(SessionRef::from(1), Arc::new(gateway), Journal::default());
        service.refresh().await.unwrap();

        let journal = service.journal();
        assert_eq!(journal.len(), 2);
        assert_eq!(journal.quests().count(), 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_entries() {
        let mut gateway = MockSessionGatewayPort::new();
        gateway
            .expect_journal()
            .returning(|_| Err(ApiError::Timeout));

        let previous = Journal::new(vec![entry(1, JournalKind::Character)]);
        let service = JournalService::new(SessionRef::from(1), Arc::new(gateway), previous.clone());
        service.refresh_or_keep().await;

        assert_eq!(service.journal(), previous);
    }
}
