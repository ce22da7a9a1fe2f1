//! Test doubles for the session server

mod fake_session_server;
pub mod fixtures;

pub use fake_session_server::{FakeSessionServer, GatewayCall};
