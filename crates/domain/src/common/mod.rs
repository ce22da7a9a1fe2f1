//! Common utility functions shared across the Talekeeper crates.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **Minimal dependencies** - only chrono for datetime utilities

pub mod datetime;
pub mod string;

// Re-export commonly used functions at crate root for convenience
pub use datetime::{parse_timestamp, parse_timestamp_or};
pub use string::{non_blank, some_if_not_blank};
