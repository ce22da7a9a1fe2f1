//! In-memory stand-in for the session server.
//!
//! Behaves like the real API: history pages count backwards from the newest
//! turn, an action appends a user turn and a narrator reply, and undo removes
//! the latest user turn together with everything after it. Individual calls
//! can be made to fail or to block until released.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use talekeeper_domain::{
    JournalEntry, JournalKind, Language, NewSession, Role, SessionInfo, SessionRef, Turn,
};
use tokio::sync::Notify;

use super::fixtures::at;
use crate::ports::outbound::{ApiError, SessionGatewayPort};

/// Gateway operations, for failure injection and call accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayCall {
    History,
    Action,
    Undo,
    Session,
    Journal,
    ListSessions,
    CreateSession,
    DeleteSession,
}

struct StoredSession {
    info: SessionInfo,
    turns: Vec<Turn>,
    journal: Vec<JournalEntry>,
}

#[derive(Default)]
struct State {
    sessions: Vec<StoredSession>,
    next_session_id: i64,
    next_turn_id: i64,
    next_entry_id: i64,
    /// Minutes past the fixture epoch of the last stored turn
    tick: i64,
    failures: HashMap<GatewayCall, VecDeque<ApiError>>,
    holds: HashMap<GatewayCall, Arc<Notify>>,
    history_calls: Vec<(usize, usize)>,
    calls: HashMap<GatewayCall, usize>,
}

impl State {
    fn stored(&mut self, session: &SessionRef) -> Result<&mut StoredSession, ApiError> {
        self.sessions
            .iter_mut()
            .find(|s| &s.info.id == session)
            .ok_or_else(|| ApiError::http(404, "Session not found"))
    }

    fn push_turn(&mut self, session: &SessionRef, role: Role, content: String) -> Result<(), ApiError> {
        self.next_turn_id += 1;
        self.tick += 1;
        let turn = Turn::confirmed(self.next_turn_id, role, content, at(self.tick));
        self.stored(session)?.turns.push(turn);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeSessionServer {
    state: Mutex<State>,
}

impl FakeSessionServer {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a session with an empty history.
    pub fn add_session(&self, name: &str) -> SessionRef {
        let mut state = self.state();
        state.next_session_id += 1;
        let id = SessionRef::from(state.next_session_id);
        state.sessions.push(StoredSession {
            info: SessionInfo {
                id: id.clone(),
                name: name.to_string(),
                start_prompt: format!("The tale of {} begins.", name),
                summary: None,
                created_at: at(0),
            },
            turns: Vec::new(),
            journal: Vec::new(),
        });
        id
    }

    /// Append `count` alternating user/narrator turns.
    ///
    /// Panics if `session` was never added.
    pub fn seed_turns(&self, session: &SessionRef, count: usize) {
        let mut state = self.state();
        for i in 0..count {
            let role = if i % 2 == 0 { Role::User } else { Role::Narrator };
            let content = format!("seeded turn {}", i + 1);
            if let Err(e) = state.push_turn(session, role, content) {
                panic!("cannot seed turns into session {}: {}", session, e);
            }
        }
    }

    pub fn add_journal_entry(&self, session: &SessionRef, kind: JournalKind, title: &str) {
        let mut state = self.state();
        state.next_entry_id += 1;
        let entry = JournalEntry {
            id: state.next_entry_id,
            kind,
            title: title.to_string(),
            content: format!("Notes on {}", title),
            created_at: at(state.tick),
        };
        if let Ok(stored) = state.stored(session) {
            stored.journal.push(entry);
        }
    }

    /// Make the next `call` fail with `error`. Queued failures are consumed in order.
    pub fn fail_next(&self, call: GatewayCall, error: ApiError) {
        self.state().failures.entry(call).or_default().push_back(error);
    }

    /// Block the next `call` until the returned handle is notified.
    pub fn hold(&self, call: GatewayCall) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state().holds.insert(call, Arc::clone(&gate));
        gate
    }

    /// `(limit, offset)` of every history request, in order.
    pub fn history_calls(&self) -> Vec<(usize, usize)> {
        self.state().history_calls.clone()
    }

    pub fn call_count(&self, call: GatewayCall) -> usize {
        self.state().calls.get(&call).copied().unwrap_or(0)
    }

    pub fn turns(&self, session: &SessionRef) -> Vec<Turn> {
        self.state()
            .stored(session)
            .map(|s| s.turns.clone())
            .unwrap_or_default()
    }

    async fn enter(&self, call: GatewayCall) -> Result<(), ApiError> {
        let gate = {
            let mut state = self.state();
            *state.calls.entry(call).or_default() += 1;
            state.holds.remove(&call)
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let failure = self
            .state()
            .failures
            .get_mut(&call)
            .and_then(VecDeque::pop_front);
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SessionGatewayPort for FakeSessionServer {
    async fn history(
        &self,
        session: &SessionRef,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Turn>, ApiError> {
        self.state().history_calls.push((limit, offset));
        self.enter(GatewayCall::History).await?;

        let mut state = self.state();
        let turns = &state.stored(session)?.turns;
        let end = turns.len().saturating_sub(offset);
        let start = end.saturating_sub(limit);
        Ok(turns[start..end].to_vec())
    }

    async fn send_action(
        &self,
        session: &SessionRef,
        text: &str,
        _language: Language,
    ) -> Result<(), ApiError> {
        self.enter(GatewayCall::Action).await?;

        let mut state = self.state();
        state.push_turn(session, Role::User, text.to_string())?;
        state.push_turn(session, Role::Narrator, format!("The narrator answers: {}", text))
    }

    async fn undo(&self, session: &SessionRef) -> Result<(), ApiError> {
        self.enter(GatewayCall::Undo).await?;

        let mut state = self.state();
        let turns = &mut state.stored(session)?.turns;
        let last_user = turns
            .iter()
            .rposition(|t| t.role == Role::User)
            .ok_or_else(|| ApiError::http(400, "No moves to undo"))?;
        turns.truncate(last_user);
        Ok(())
    }

    async fn session(&self, session: &SessionRef) -> Result<SessionInfo, ApiError> {
        self.enter(GatewayCall::Session).await?;
        Ok(self.state().stored(session)?.info.clone())
    }

    async fn journal(&self, session: &SessionRef) -> Result<Vec<JournalEntry>, ApiError> {
        self.enter(GatewayCall::Journal).await?;
        Ok(self.state().stored(session)?.journal.clone())
    }

    async fn list_sessions(&self) -> Result<Vec<SessionInfo>, ApiError> {
        self.enter(GatewayCall::ListSessions).await?;
        Ok(self
            .state()
            .sessions
            .iter()
            .map(|s| s.info.clone())
            .collect())
    }

    async fn create_session(&self, new_session: &NewSession) -> Result<SessionInfo, ApiError> {
        self.enter(GatewayCall::CreateSession).await?;
        let id = self.add_session(new_session.name());
        let mut state = self.state();
        let stored = state.stored(&id)?;
        stored.info.start_prompt = new_session.start_prompt().to_string();
        Ok(stored.info.clone())
    }

    async fn delete_session(&self, session: &SessionRef) -> Result<(), ApiError> {
        self.enter(GatewayCall::DeleteSession).await?;
        let mut state = self.state();
        let before = state.sessions.len();
        state.sessions.retain(|s| &s.info.id != session);
        if state.sessions.len() == before {
            return Err(ApiError::http(404, "Session not found"));
        }
        Ok(())
    }
}
