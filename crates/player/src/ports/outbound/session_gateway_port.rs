//! Session Gateway Port - the session server as seen by the application layer
//!
//! Every call is scoped to a [`SessionRef`]. Implementations report failures
//! as [`ApiError`] and never retry on their own.

use async_trait::async_trait;
use talekeeper_domain::{JournalEntry, Language, NewSession, SessionInfo, SessionRef, Turn};

use super::ApiError;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SessionGatewayPort: Send + Sync {
    /// Up to `limit` turns, skipping the `offset` most recent ones.
    ///
    /// The page is returned oldest first. A page shorter than `limit` means
    /// no older turns exist.
    async fn history(
        &self,
        session: &SessionRef,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Turn>, ApiError>;

    /// Submit a player action. Returns once the narrator has replied and both
    /// turns are persisted.
    async fn send_action(
        &self,
        session: &SessionRef,
        text: &str,
        language: Language,
    ) -> Result<(), ApiError>;

    /// Revert the most recent action and everything after it.
    async fn undo(&self, session: &SessionRef) -> Result<(), ApiError>;

    async fn session(&self, session: &SessionRef) -> Result<SessionInfo, ApiError>;

    async fn journal(&self, session: &SessionRef) -> Result<Vec<JournalEntry>, ApiError>;

    async fn list_sessions(&self) -> Result<Vec<SessionInfo>, ApiError>;

    async fn create_session(&self, new_session: &NewSession) -> Result<SessionInfo, ApiError>;

    async fn delete_session(&self, session: &SessionRef) -> Result<(), ApiError>;
}
