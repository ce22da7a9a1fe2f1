//! End-to-end tests of a session view against the in-memory session server.
//!
//! ```bash
//! cargo test -p talekeeper-player --lib e2e_tests
//! ```

mod e2e_helpers;
mod timeline_sync_tests;
