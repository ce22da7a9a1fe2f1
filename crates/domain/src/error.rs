//! Unified error types for the domain layer
//!
//! Provides a common error type for domain operations so adapters never
//! need to fall back to `String` or `anyhow` for domain failures.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., empty session name)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects and wire vocabulary)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Operation not allowed in the aggregate's current state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if name.trim().is_empty() {
    ///     return Err(DomainError::validation("Session name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}
