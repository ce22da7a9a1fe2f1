//! Journal entities - quests, characters and lore the narrator has recorded
//!
//! The server derives journal entries from the story; the client only reads
//! them and groups them for display.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Kind of journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalKind {
    Quest,
    Character,
    Lore,
}

impl JournalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quest => "quest",
            Self::Character => "character",
            Self::Lore => "lore",
        }
    }
}

impl fmt::Display for JournalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JournalKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quest" => Ok(Self::Quest),
            "character" => Ok(Self::Character),
            "lore" => Ok(Self::Lore),
            other => Err(DomainError::parse(format!(
                "Unknown journal entry type: {}",
                other
            ))),
        }
    }
}

/// A single journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub kind: JournalKind,
    /// Quest title, character name or lore topic
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Journal entries grouped by kind, each group in server order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new(entries: Vec<JournalEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn of_kind(&self, kind: JournalKind) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    pub fn quests(&self) -> impl Iterator<Item = &JournalEntry> {
        self.of_kind(JournalKind::Quest)
    }

    pub fn characters(&self) -> impl Iterator<Item = &JournalEntry> {
        self.of_kind(JournalKind::Character)
    }

    pub fn lore(&self) -> impl Iterator<Item = &JournalEntry> {
        self.of_kind(JournalKind::Lore)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
