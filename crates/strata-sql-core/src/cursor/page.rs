//! Offset-based page cursor.

use super::{Cursor, DEFAULT_PAGE_SIZE};
use crate::query::SelectQuery;

/// Classic page/offset pagination: `LIMIT page_size OFFSET page*page_size`.
///
/// Pages are zero-based; page 0 renders `OFFSET 0`. Offset paging can skip
/// or repeat rows under concurrent writes; prefer a boundary cursor when
/// the ordering allows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    page: u64,
    page_size: u64,
}

impl PageCursor {
    /// Creates a cursor at page 0 with the default page size.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Moves to the given zero-based page.
    pub fn set_page(&mut self, page: u64) {
        self.page = page;
    }

    /// Overrides the page size.
    pub fn set_page_size(&mut self, page_size: u64) {
        self.page_size = page_size;
    }

    /// Returns the current zero-based page.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor for PageCursor {
    fn apply(&self, query: &mut SelectQuery) {
        query.set_limit(self.page_size);
        query.set_offset(self.page * self.page_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MysqlDialect;

    const DIALECT: MysqlDialect = MysqlDialect::new();

    #[test]
    fn test_first_page_uses_defaults() {
        let mut query = SelectQuery::new("projects").alias("p").order_by("id ASC");
        PageCursor::new().apply(&mut query);

        let rendered = query.render(&DIALECT).unwrap();
        assert_eq!(
            rendered.sql,
            "SELECT `p`.* FROM `projects` AS `p` ORDER BY id ASC LIMIT 50 OFFSET 0"
        );
    }

    #[test]
    fn test_offset_is_page_times_size() {
        let mut cursor = PageCursor::new();
        cursor.set_page(3);
        cursor.set_page_size(20);

        let mut query = SelectQuery::new("projects").alias("p").order_by("id ASC");
        cursor.apply(&mut query);

        let rendered = query.render(&DIALECT).unwrap();
        assert_eq!(
            rendered.sql,
            "SELECT `p`.* FROM `projects` AS `p` ORDER BY id ASC LIMIT 20 OFFSET 40"
        );
    }

    #[test]
    fn test_apply_twice_is_idempotent() {
        let cursor = PageCursor::new();
        let mut query = SelectQuery::new("projects").order_by("id ASC");

        cursor.apply(&mut query);
        let first = query.render(&DIALECT).unwrap();
        cursor.apply(&mut query);
        let second = query.render(&DIALECT).unwrap();

        assert_eq!(first, second);
    }
}
