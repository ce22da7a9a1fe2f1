//! Talekeeper Player.
//!
//! Client side of a turn-based narrative chat: keeps a session's timeline in
//! sync with the session server, pages backwards through history and
//! sequences the player's actions and undos.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod state;

#[cfg(test)]
mod e2e_tests;

pub use application::services::{SessionCatalogService, SessionView};
pub use application::{ErrorKind, ServiceError};
pub use config::PlayerConfig;
