//! Application services
//!
//! This module contains the services behind a session view. Services depend
//! on port traits, not concrete infrastructure implementations.

pub mod action_service;
mod in_flight;
pub mod journal_service;
pub mod pagination_service;
pub mod session_catalog_service;
pub mod session_service;

pub use action_service::{ActionSequencer, SequencerState};
pub use journal_service::JournalService;
pub use pagination_service::PaginationController;
pub use session_catalog_service::SessionCatalogService;
pub use session_service::SessionView;
