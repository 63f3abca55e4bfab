//! Abstract query model.
//!
//! Each query subtype is a mutable builder that renders on demand to a
//! [`Rendered`] pair of SQL text and an ordered, named parameter map.
//! Rendering is idempotent and consumes the dialect driver only for
//! identifier escaping; WHERE/ORDER BY/GROUP BY fragments pass through as
//! raw SQL with `?` positional placeholders rewritten to uniquely named
//! ones (`:w0`, `:u1w0`, …) at render time.

mod delete;
mod insert;
mod lock;
mod params;
mod raw;
mod select;
mod union;
mod value;

pub use delete::DeleteQuery;
pub use insert::InsertQuery;
pub use lock::{LockMode, LockTablesQuery, TableLock, UnlockTablesQuery};
pub use params::Params;
pub use raw::RawQuery;
pub use select::SelectQuery;
pub use union::UnionQuery;
pub use value::{SqlValue, ToSqlValue};

/// A rendered statement: SQL text plus its ordered parameter map.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// The SQL text with named placeholders.
    pub sql: String,
    /// Parameters in placeholder order; names match the placeholders in
    /// `sql` exactly.
    pub params: Params,
}

/// A value assigned to a column by INSERT or UPDATE: either a bound scalar
/// or a bare reference to another column.
#[derive(Debug, Clone, PartialEq)]
pub enum SetValue {
    /// A scalar bound through a named placeholder.
    Value(SqlValue),
    /// Another column, rendered as an escaped identifier.
    Field(String),
}
