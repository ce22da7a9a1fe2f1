//! Value objects - immutable, identity-less domain values

mod language;
mod page_cursor;

pub use language::Language;
pub use page_cursor::{PageCursor, DEFAULT_PAGE_SIZE};
