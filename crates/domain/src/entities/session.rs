//! Session metadata shown alongside the timeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::non_blank;
use crate::error::DomainError;
use crate::ids::SessionRef;

/// Display metadata of a play session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: SessionRef,
    pub name: String,
    /// The premise the adventure started from
    pub start_prompt: String,
    /// Rolling story summary maintained by the server
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated request to start a new session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    name: String,
    start_prompt: String,
}

impl NewSession {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is blank.
    pub fn new(name: &str, start_prompt: &str) -> Result<Self, DomainError> {
        let name =
            non_blank(name).ok_or_else(|| DomainError::validation("Session name cannot be empty"))?;
        Ok(Self {
            name: name.to_string(),
            start_prompt: start_prompt.trim().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_prompt(&self) -> &str {
        &self.start_prompt
    }
}
