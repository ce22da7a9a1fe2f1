//! Clock port for testable time handling

use chrono::{DateTime, Utc};

/// Source of "now" for placeholder timestamps
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
