//! Timeline aggregate - the ordered chat history of one session view
//!
//! # Invariants
//!
//! - Turns are sorted by `timestamp` ascending; equal timestamps keep arrival
//!   order.
//! - No two turns share a confirmed id.
//! - At most one placeholder turn exists at a time.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use talekeeper_domain::aggregates::{PageEdge, Timeline};
//! use talekeeper_domain::{Role, Turn};
//!
//! let mut timeline = Timeline::new();
//! timeline.insert_placeholder(Turn::placeholder("open door", Utc::now())).unwrap();
//!
//! let now = Utc::now();
//! timeline.merge_page(
//!     vec![
//!         Turn::confirmed(1, Role::User, "open door", now),
//!         Turn::confirmed(2, Role::Narrator, "The door creaks open.", now),
//!     ],
//!     PageEdge::Newest,
//! );
//!
//! assert_eq!(timeline.len(), 2);
//! assert!(timeline.placeholder().is_none());
//! ```

mod reconcile;

pub use reconcile::{reconcile, PageEdge, Reconciled};

use crate::entities::Turn;
use crate::error::DomainError;
use crate::events::TimelineChange;
use crate::ids::{PlaceholderId, TurnId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    turns: Vec<Turn>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timeline from an authoritative page.
    pub fn from_page(turns: Vec<Turn>) -> Self {
        let mut timeline = Self::new();
        timeline.replace(turns);
        timeline
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Owned copy of the ordered turns.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of server-confirmed turns.
    pub fn confirmed_len(&self) -> usize {
        self.turns.iter().filter(|t| !t.is_placeholder()).count()
    }

    /// The outstanding placeholder, if any.
    pub fn placeholder(&self) -> Option<&Turn> {
        self.turns.iter().find(|t| t.is_placeholder())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert an optimistic turn at its sorted position.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidState` if a placeholder is already outstanding or
    /// `turn` is not a placeholder.
    pub fn insert_placeholder(&mut self, turn: Turn) -> Result<TimelineChange, DomainError> {
        let TurnId::Placeholder(id) = turn.id else {
            return Err(DomainError::invalid_state(format!(
                "turn {} is already confirmed",
                turn.id
            )));
        };
        if let Some(existing) = self.placeholder() {
            return Err(DomainError::invalid_state(format!(
                "placeholder {} is still awaiting confirmation",
                existing.id
            )));
        }

        let index = self
            .turns
            .partition_point(|t| t.timestamp <= turn.timestamp);
        self.turns.insert(index, turn);

        Ok(TimelineChange::PlaceholderInserted { id, index })
    }

    /// Remove a placeholder, e.g. after its action failed.
    ///
    /// Returns `None` if the placeholder is no longer present (a newest-edge
    /// merge already superseded it).
    pub fn discard_placeholder(&mut self, id: PlaceholderId) -> Option<TimelineChange> {
        let position = self
            .turns
            .iter()
            .position(|t| t.id == TurnId::Placeholder(id))?;
        self.turns.remove(position);
        Some(TimelineChange::PlaceholderDiscarded { id })
    }

    /// Fold an authoritative page into the timeline.
    pub fn merge_page(&mut self, turns: Vec<Turn>, edge: PageEdge) -> TimelineChange {
        let Reconciled {
            turns,
            added,
            updated,
            superseded,
        } = reconcile(&self.turns, turns, edge);
        self.turns = turns;

        TimelineChange::PageMerged {
            edge,
            added,
            updated,
            superseded,
        }
    }

    /// Discard local state in favour of an authoritative page.
    ///
    /// Used after undo, where turns must disappear and no merge could
    /// remove them.
    pub fn replace(&mut self, turns: Vec<Turn>) -> TimelineChange {
        let previous_len = self.turns.len();
        self.turns = reconcile(&[], turns, PageEdge::Newest).turns;

        TimelineChange::Replaced {
            previous_len,
            len: self.turns.len(),
        }
    }
}
