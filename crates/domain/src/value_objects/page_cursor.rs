//! Backward pagination progress through a session's history.

use serde::{Deserialize, Serialize};

/// Page size the session view requests when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Tracks how far back through history the client has paged.
///
/// # Invariants
///
/// - `limit` is never zero.
/// - Once `has_more` is false it stays false until [`PageCursor::reset_from_page`],
///   which only the initial load and undo call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    offset: usize,
    limit: usize,
    has_more: bool,
}

impl PageCursor {
    /// A cursor before any page has been fetched.
    pub fn initial(limit: usize) -> Self {
        Self {
            offset: 0,
            limit: limit.max(1),
            has_more: true,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a page of `len` turns may have older history behind it.
    ///
    /// A page filled exactly to the limit counts as "more may exist".
    pub fn page_may_continue(&self, len: usize) -> bool {
        len >= self.limit
    }

    /// Start over from a freshly fetched newest page.
    pub fn reset_from_page(&mut self, len: usize) {
        self.offset = len;
        self.has_more = self.page_may_continue(len);
    }

    /// Record a backward page fetched at `offset`.
    pub fn record_page(&mut self, offset: usize, len: usize) {
        self.offset = offset + len;
        if !self.page_may_continue(len) {
            self.has_more = false;
        }
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::initial(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_page_exhausts_history() {
        let mut cursor = PageCursor::initial(20);
        cursor.reset_from_page(20);
        assert!(cursor.has_more());

        cursor.record_page(20, 15);
        assert!(!cursor.has_more());
        assert_eq!(cursor.offset(), 35);
    }

    #[test]
    fn full_page_keeps_history_open() {
        let mut cursor = PageCursor::initial(20);
        cursor.record_page(0, 20);
        assert!(cursor.has_more());
    }

    #[test]
    fn exhausted_cursor_never_reopens_from_paging() {
        let mut cursor = PageCursor::initial(20);
        cursor.record_page(0, 3);
        cursor.record_page(3, 20);
        assert!(!cursor.has_more());
    }

    #[test]
    fn reset_recomputes_has_more() {
        let mut cursor = PageCursor::initial(20);
        cursor.record_page(0, 0);
        assert!(!cursor.has_more());

        cursor.reset_from_page(20);
        assert!(cursor.has_more());

        cursor.reset_from_page(8);
        assert!(!cursor.has_more());
    }

    #[test]
    fn zero_limit_is_clamped() {
        assert_eq!(PageCursor::initial(0).limit(), 1);
    }
}
