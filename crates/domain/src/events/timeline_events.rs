//! Timeline mutation outcomes.

use crate::aggregates::PageEdge;
use crate::ids::PlaceholderId;

/// Outcome of mutating a [`Timeline`](crate::aggregates::Timeline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineChange {
    PlaceholderInserted {
        id: PlaceholderId,
        index: usize,
    },
    PlaceholderDiscarded {
        id: PlaceholderId,
    },
    PageMerged {
        edge: PageEdge,
        /// Turns whose id was not in the timeline before
        added: usize,
        /// Known turns whose content changed
        updated: usize,
        /// Placeholders dropped because the server copy supersedes them
        superseded: usize,
    },
    Replaced {
        previous_len: usize,
        len: usize,
    },
}

impl TimelineChange {
    /// Number of turns that became newly visible.
    pub fn added(&self) -> usize {
        match self {
            Self::PageMerged { added, .. } => *added,
            Self::PlaceholderInserted { .. } => 1,
            Self::PlaceholderDiscarded { .. } | Self::Replaced { .. } => 0,
        }
    }
}
