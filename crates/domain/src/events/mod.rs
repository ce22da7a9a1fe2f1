//! Aggregate mutation outcomes.
//!
//! Aggregates return these from their mutating methods so callers can
//! react (notify observers, log) without diffing state themselves.

pub mod timeline_events;

pub use timeline_events::TimelineChange;
