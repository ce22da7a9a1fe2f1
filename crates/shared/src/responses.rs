//! Response bodies returned by the session server.

use serde::{Deserialize, Serialize};

/// One stored chat message (`GET /sessions/{id}/history` item)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnData {
    /// Always present for stored messages
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,
    /// `user`, `assistant` or `system`
    pub role: String,
    pub content: String,
    /// ISO-8601, usually without offset (naive UTC)
    pub timestamp: String,
}

/// A play session (`GET /sessions/{id}` and list items)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub start_prompt: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A journal entry (`GET /sessions/{id}/journal` item)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryData {
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,
    pub title: String,
    pub content: String,
    /// `quest`, `lore` or `character`
    pub entry_type: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `POST /sessions/{id}/action`. The player re-fetches history instead of
/// trusting this body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub response: String,
}

/// `POST /sessions/{id}/undo`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoResponse {
    pub success: bool,
}

/// `DELETE /sessions/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

/// Error body of non-2xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
