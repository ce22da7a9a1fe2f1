//! HTTP-backed [`SessionGatewayPort`]

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use talekeeper_domain::{JournalEntry, Language, NewSession, SessionInfo, SessionRef, Turn};
use talekeeper_shared::{
    routes, ActionRequest, CreateSessionRequest, HistoryQuery, JournalEntryData, SessionData,
    SessionListQuery, TurnData,
};

use super::dto_converters::{journal_entry_from_data, session_from_data, turn_from_data};
use crate::ports::outbound::{ApiError, RawApiPort, SessionGatewayPort};

pub struct HttpSessionGateway {
    api: Arc<dyn RawApiPort>,
}

impl HttpSessionGateway {
    pub fn new(api: Arc<dyn RawApiPort>) -> Self {
        Self { api }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::ParseError(e.to_string()))
}

fn encode<T: Serialize>(body: &T) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::SerializeError(e.to_string()))
}

#[async_trait]
impl SessionGatewayPort for HttpSessionGateway {
    async fn history(
        &self,
        session: &SessionRef,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Turn>, ApiError> {
        let path = routes::history(session, HistoryQuery { limit, offset });
        let page: Vec<TurnData> = decode(self.api.get_json(&path).await?)?;

        // A turn we cannot read would shift every later offset, so the whole
        // page is rejected.
        page.into_iter()
            .map(|data| turn_from_data(data).map_err(|e| ApiError::ParseError(e.to_string())))
            .collect()
    }

    async fn send_action(
        &self,
        session: &SessionRef,
        text: &str,
        language: Language,
    ) -> Result<(), ApiError> {
        let body = encode(&ActionRequest::new(text, language))?;
        self.api.post_json(&routes::action(session), &body).await?;
        Ok(())
    }

    async fn undo(&self, session: &SessionRef) -> Result<(), ApiError> {
        self.api.post_empty(&routes::undo(session)).await?;
        Ok(())
    }

    async fn session(&self, session: &SessionRef) -> Result<SessionInfo, ApiError> {
        let data: SessionData = decode(self.api.get_json(&routes::session(session)).await?)?;
        session_from_data(data).map_err(|e| ApiError::ParseError(e.to_string()))
    }

    async fn journal(&self, session: &SessionRef) -> Result<Vec<JournalEntry>, ApiError> {
        let entries: Vec<JournalEntryData> =
            decode(self.api.get_json(&routes::journal(session)).await?)?;

        Ok(entries
            .into_iter()
            .filter_map(|data| match journal_entry_from_data(data) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(session = %session, error = %e, "Skipping unreadable journal entry");
                    None
                }
            })
            .collect())
    }

    async fn list_sessions(&self) -> Result<Vec<SessionInfo>, ApiError> {
        let path = routes::sessions(SessionListQuery::default());
        let sessions: Vec<SessionData> = decode(self.api.get_json(&path).await?)?;
        sessions
            .into_iter()
            .map(|data| session_from_data(data).map_err(|e| ApiError::ParseError(e.to_string())))
            .collect()
    }

    async fn create_session(&self, new_session: &NewSession) -> Result<SessionInfo, ApiError> {
        let body = encode(&CreateSessionRequest {
            name: new_session.name().to_string(),
            start_prompt: new_session.start_prompt().to_string(),
        })?;
        let data: SessionData = decode(self.api.post_json(routes::create_session(), &body).await?)?;
        session_from_data(data).map_err(|e| ApiError::ParseError(e.to_string()))
    }

    async fn delete_session(&self, session: &SessionRef) -> Result<(), ApiError> {
        self.api.delete(&routes::session(session)).await?;
        Ok(())
    }
}
