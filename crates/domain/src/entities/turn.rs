//! Turn entity - one chat entry in a session
//!
//! A turn is either a user action or a narrator reply. Turns created by the
//! client before the server confirms them carry a placeholder id.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{PlaceholderId, TurnId};

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    /// The server-side storyteller. The wire vocabulary also calls it
    /// `assistant`, and stored `system` turns render the same way.
    #[serde(alias = "assistant", alias = "system")]
    Narrator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Narrator => "narrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "narrator" | "assistant" | "system" => Ok(Self::Narrator),
            other => Err(DomainError::parse(format!("Unknown turn role: {}", other))),
        }
    }
}

/// One chat entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub role: Role,
    pub content: String,
    /// Total-orders turns within a timeline
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// A server-confirmed turn.
    pub fn confirmed(
        id: i64,
        role: Role,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TurnId::Confirmed(id),
            role,
            content: content.into(),
            timestamp,
        }
    }

    /// An optimistic user turn awaiting server confirmation.
    pub fn placeholder(content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: TurnId::Placeholder(PlaceholderId::new()),
            role: Role::User,
            content: content.into(),
            timestamp: now,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_placeholder()
    }
}
