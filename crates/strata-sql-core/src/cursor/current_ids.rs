//! Seen-id exclusion cursor.

use super::{Cursor, DEFAULT_PAGE_SIZE};
use crate::query::{SelectQuery, SqlValue, ToSqlValue};

/// Excludes already-seen primary-key values via `pk NOT IN (…)`.
///
/// For randomized or otherwise unstable orderings where offset paging would
/// skip or repeat rows. The excluded-id set only grows; the cursor never
/// resets itself.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentIdsCursor {
    ids: Vec<SqlValue>,
    page_size: u64,
}

impl CurrentIdsCursor {
    /// Creates a cursor with no excluded ids and the default page size.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ids: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Adds the ids seen on the previous page; duplicates are ignored.
    pub fn add_current_ids<T: ToSqlValue>(&mut self, ids: impl IntoIterator<Item = T>) {
        for id in ids {
            let value = id.to_sql_value();
            if !self.ids.contains(&value) {
                self.ids.push(value);
            }
        }
    }

    /// Overrides the page size.
    pub fn set_page_size(&mut self, page_size: u64) {
        self.page_size = page_size;
    }

    /// Returns the excluded ids, in insertion order.
    #[must_use]
    pub fn current_ids(&self) -> &[SqlValue] {
        &self.ids
    }
}

impl Default for CurrentIdsCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor for CurrentIdsCursor {
    fn apply(&self, query: &mut SelectQuery) {
        query.set_limit(self.page_size);
        if self.ids.is_empty() {
            return;
        }
        let placeholders = vec!["?"; self.ids.len()].join(", ");
        query.set_cursor_filter(
            format!("{} NOT IN ({placeholders})", query.primary_key()),
            self.ids.clone(),
        );
    }
}
