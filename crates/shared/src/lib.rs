//! Talekeeper wire contract - types shared with the session server
//!
//! This crate contains the request/response bodies and route paths of the
//! session server's REST API.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - only serde, serde_json and the domain vocabulary
//! 2. **No business logic** - pure data types and serialization
//! 3. **No domain entities** - ids are raw `i64`, timestamps raw strings;
//!    conversion happens in the player's infrastructure layer

pub mod requests;
pub mod responses;
pub mod routes;

pub use requests::{ActionRequest, CreateSessionRequest, HistoryQuery, SessionListQuery};
pub use responses::{
    ActionResponse, DeleteResponse, ErrorResponse, JournalEntryData, SessionData, TurnData,
    UndoResponse,
};
