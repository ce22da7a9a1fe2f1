//! Service layer error types
//!
//! Every failure a session view reports to its caller falls into one of three
//! kinds (see [`ErrorKind`]); the variants keep enough detail for logging.

use talekeeper_domain::DomainError;
use thiserror::Error;

use crate::ports::outbound::ApiError;

/// Coarse classification shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The server could not be reached or answered with an error
    NetworkFailure,
    /// Another send or undo is still in flight
    Busy,
    /// The operation makes no sense in the current state
    InvalidState,
}

/// Errors that can occur in service operations
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("Network failure: {0}")]
    Network(#[from] ApiError),

    #[error("Another action is still pending")]
    Busy,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Action text is empty")]
    EmptyAction,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Undo failed: {0}")]
    UndoFailed(ApiError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) | Self::UndoFailed(_) => ErrorKind::NetworkFailure,
            Self::Busy => ErrorKind::Busy,
            Self::InvalidState(_) | Self::EmptyAction | Self::NothingToUndo | Self::Domain(_) => {
                ErrorKind::InvalidState
            }
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Network(e) | Self::UndoFailed(e) => e.is_not_found(),
            _ => false,
        }
    }
}
