//! Cursor pagination strategies.
//!
//! A cursor is pagination state that outlives a single query render: the
//! caller applies it to a SELECT before each page and advances it from the
//! previous page's results between pages. `apply` mutates only the query's
//! LIMIT/OFFSET and its dedicated cursor-filter slot, so re-applying a
//! cursor with unchanged state yields byte-identical SQL.

mod boundary;
mod current_ids;
mod page;

pub use boundary::{MaxValueCursor, MinValueCursor};
pub use current_ids::CurrentIdsCursor;
pub use page::PageCursor;

use crate::query::SelectQuery;

/// Default page size used by every cursor unless overridden per instance.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// A pagination policy applied to a SELECT query before execution.
pub trait Cursor {
    /// Mutates the query's ordering filter and limit for the current page.
    ///
    /// Safe to call repeatedly: given unchanged cursor state the query
    /// renders identically after each call.
    fn apply(&self, query: &mut SelectQuery);
}
