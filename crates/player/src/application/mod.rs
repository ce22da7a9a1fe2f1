//! Application layer: session view services and their error types.

pub mod error;
pub mod services;

pub use error::{ErrorKind, ServiceError};
