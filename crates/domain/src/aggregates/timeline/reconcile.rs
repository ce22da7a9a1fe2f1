//! Reconciliation of a local timeline with an authoritative page.
//!
//! Turns are keyed by their confirmed id. The existing timeline seeds the map,
//! incoming turns overlay it (incoming wins on collision), and the result is
//! stably sorted by timestamp. Folding the same page twice, or two overlapping
//! authoritative pages in either order, yields the same timeline.

use std::collections::HashMap;

use crate::entities::Turn;

/// Which end of the timeline a page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEdge {
    /// Most recent history, fetched after an action. Supersedes placeholders.
    Newest,
    /// Older history, fetched by backward pagination.
    Oldest,
}

/// Result of folding a page into a timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// Sorted, duplicate-free turns
    pub turns: Vec<Turn>,
    pub added: usize,
    pub updated: usize,
    pub superseded: usize,
}

/// Fold `incoming` into `existing` at `edge`.
///
/// Arrival order is the order turns would sit in if the page were simply
/// prepended (`Oldest`) or appended (`Newest`). It only decides between turns
/// with equal timestamps; a turn keeps the slot of its first arrival.
///
/// Placeholders in `existing` are dropped on a `Newest` merge and carried
/// through an `Oldest` merge. Placeholders in `incoming` are ignored.
pub fn reconcile(existing: &[Turn], incoming: Vec<Turn>, edge: PageEdge) -> Reconciled {
    let (placeholders, confirmed): (Vec<&Turn>, Vec<&Turn>) =
        existing.iter().partition(|t| t.is_placeholder());

    let page = incoming.into_iter().map(|t| (t, true));
    let local = confirmed.into_iter().map(|t| (t.clone(), false));
    let arrivals: Vec<(Turn, bool)> = match edge {
        PageEdge::Oldest => page.chain(local).collect(),
        PageEdge::Newest => local.chain(page).collect(),
    };

    let mut turns: Vec<Turn> = Vec::with_capacity(arrivals.len() + placeholders.len());
    let mut slots: HashMap<i64, usize> = HashMap::with_capacity(arrivals.len());
    let mut added = 0usize;
    let mut updated = 0usize;

    for (turn, from_page) in arrivals {
        let Some(key) = turn.id.confirmed() else {
            continue;
        };

        match slots.get(&key) {
            None => {
                if from_page {
                    added += 1;
                }
                slots.insert(key, turns.len());
                turns.push(turn);
            }
            Some(&slot) if from_page => {
                if turns[slot] != turn {
                    updated += 1;
                }
                turns[slot] = turn;
            }
            Some(&slot) => {
                // The page already delivered this turn, so it was not new.
                added = added.saturating_sub(1);
                if turns[slot] != turn {
                    updated += 1;
                }
            }
        }
    }

    let superseded = match edge {
        PageEdge::Newest => placeholders.len(),
        PageEdge::Oldest => {
            turns.extend(placeholders.into_iter().cloned());
            0
        }
    };

    // Stable: equal timestamps keep arrival order.
    turns.sort_by_key(|t| t.timestamp);

    Reconciled {
        turns,
        added,
        updated,
        superseded,
    }
}
