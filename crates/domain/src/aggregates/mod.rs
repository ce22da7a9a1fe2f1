//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns change events from mutations

pub mod timeline;

pub use timeline::{reconcile, PageEdge, Reconciled, Timeline};
