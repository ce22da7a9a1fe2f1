//! REST paths of the session server, relative to the API base URL.

use talekeeper_domain::SessionRef;

use crate::requests::{HistoryQuery, SessionListQuery};

pub fn sessions(query: SessionListQuery) -> String {
    format!("/sessions/?skip={}&limit={}", query.skip, query.limit)
}

pub fn create_session() -> &'static str {
    "/sessions/"
}

pub fn session(session: &SessionRef) -> String {
    format!("/sessions/{}", session)
}

pub fn history(session: &SessionRef, query: HistoryQuery) -> String {
    format!(
        "/sessions/{}/history?limit={}&offset={}",
        session, query.limit, query.offset
    )
}

pub fn action(session: &SessionRef) -> String {
    format!("/sessions/{}/action", session)
}

pub fn undo(session: &SessionRef) -> String {
    format!("/sessions/{}/undo", session)
}

pub fn journal(session: &SessionRef) -> String {
    format!("/sessions/{}/journal", session)
}
