//! Keyset (boundary-value) cursors.

use super::{Cursor, DEFAULT_PAGE_SIZE};
use crate::query::{SelectQuery, SqlValue, ToSqlValue};

/// Direction of a boundary comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// `field > boundary` — ascending keyset.
    Ascending,
    /// `field < boundary` — descending keyset.
    Descending,
}

impl Direction {
    const fn operator(self) -> &'static str {
        match self {
            Self::Ascending => ">",
            Self::Descending => "<",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct BoundaryCursor {
    direction: Direction,
    field: Option<String>,
    boundary: Option<SqlValue>,
    page_size: u64,
}

impl BoundaryCursor {
    const fn new(direction: Direction) -> Self {
        Self {
            direction,
            field: None,
            boundary: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    fn apply(&self, query: &mut SelectQuery) {
        query.set_limit(self.page_size);
        if let Some(boundary) = &self.boundary {
            let field = self
                .field
                .clone()
                .unwrap_or_else(|| query.primary_key().to_string());
            query.set_cursor_filter(
                format!("{field} {} ?", self.direction.operator()),
                vec![boundary.clone()],
            );
        }
    }
}

/// Ascending keyset cursor: filters `field > boundary` once a boundary has
/// been recorded, plus `LIMIT page_size` and never an OFFSET.
///
/// Correctness depends on the query ordering ascending by the same field;
/// the field defaults to the query's primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxValueCursor {
    inner: BoundaryCursor,
}

impl MaxValueCursor {
    /// Creates a cursor with no recorded boundary and the default page size.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: BoundaryCursor::new(Direction::Ascending),
        }
    }

    /// Overrides the comparison field (default: the query's primary key).
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.inner.field = Some(field.into());
        self
    }

    /// Records the highest value seen on the previous page.
    pub fn set_boundary(&mut self, value: impl ToSqlValue) {
        self.inner.boundary = Some(value.to_sql_value());
    }

    /// Overrides the page size.
    pub fn set_page_size(&mut self, page_size: u64) {
        self.inner.page_size = page_size;
    }

    /// Returns the recorded boundary, if any.
    #[must_use]
    pub const fn boundary(&self) -> Option<&SqlValue> {
        self.inner.boundary.as_ref()
    }
}

impl Default for MaxValueCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor for MaxValueCursor {
    fn apply(&self, query: &mut SelectQuery) {
        self.inner.apply(query);
    }
}

/// Descending keyset cursor: filters `field < boundary`, the mirror of
/// [`MaxValueCursor`].
#[derive(Debug, Clone, PartialEq)]
pub struct MinValueCursor {
    inner: BoundaryCursor,
}

impl MinValueCursor {
    /// Creates a cursor with no recorded boundary and the default page size.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: BoundaryCursor::new(Direction::Descending),
        }
    }

    /// Overrides the comparison field (default: the query's primary key).
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.inner.field = Some(field.into());
        self
    }

    /// Records the lowest value seen on the previous page.
    pub fn set_boundary(&mut self, value: impl ToSqlValue) {
        self.inner.boundary = Some(value.to_sql_value());
    }

    /// Overrides the page size.
    pub fn set_page_size(&mut self, page_size: u64) {
        self.inner.page_size = page_size;
    }

    /// Returns the recorded boundary, if any.
    #[must_use]
    pub const fn boundary(&self) -> Option<&SqlValue> {
        self.inner.boundary.as_ref()
    }
}

impl Default for MinValueCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor for MinValueCursor {
    fn apply(&self, query: &mut SelectQuery) {
        self.inner.apply(query);
    }
}
