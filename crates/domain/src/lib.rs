//! Talekeeper domain: the vocabulary and invariants of a narrated play
//! session, free of I/O.

pub mod aggregates;
pub mod common;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use aggregates::{reconcile, PageEdge, Reconciled, Timeline};
pub use entities::{Journal, JournalEntry, JournalKind, NewSession, Role, SessionInfo, Turn};
pub use error::DomainError;
pub use events::TimelineChange;
pub use ids::{PlaceholderId, SessionRef, TurnId, PLACEHOLDER_PREFIX};
pub use value_objects::{Language, PageCursor, DEFAULT_PAGE_SIZE};
