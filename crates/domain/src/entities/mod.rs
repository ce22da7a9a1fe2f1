//! Domain entities
//!
//! Plain data with identity: chat turns, journal entries and session
//! metadata. Invariants spanning many turns live in the `Timeline`
//! aggregate, not here.

mod journal;
mod session;
mod turn;

pub use journal::{Journal, JournalEntry, JournalKind};
pub use session::{NewSession, SessionInfo};
pub use turn::{Role, Turn};
