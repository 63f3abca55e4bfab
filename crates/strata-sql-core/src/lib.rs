//! # strata-sql-core
//!
//! Dialect-aware SQL construction for a declarative data-access layer:
//!
//! - A **schema model** describing tables, fields, indexes, and dialect
//!   options as immutable value objects
//! - **Dialect drivers** (MySQL-family, SQLite) translating identifiers and
//!   schema objects into engine-specific DDL, with capability gaps surfaced
//!   as typed errors
//! - An abstract **query model** (SELECT/INSERT/UPDATE/DELETE/UNION/LOCK
//!   TABLES/raw) rendering to SQL plus an ordered, named parameter map
//! - **Cursor strategies** for deterministic pagination of large result
//!   sets
//!
//! Everything here is pure and synchronous: rendering performs no I/O and
//! execution belongs to the caller's connection layer.
//!
//! ## Building a query
//!
//! ```rust
//! use strata_sql_core::dialect::MysqlDialect;
//! use strata_sql_core::query::{SelectQuery, ToSqlValue};
//!
//! let query = SelectQuery::new("projects")
//!     .alias("p")
//!     .filter("is_active = ?", vec![true.to_sql_value()])
//!     .order_by("id ASC");
//!
//! let rendered = query.render(&MysqlDialect::new()).unwrap();
//! assert_eq!(
//!     rendered.sql,
//!     "SELECT `p`.* FROM `projects` AS `p` WHERE is_active = :w0 ORDER BY id ASC"
//! );
//! ```
//!
//! ## Paginating with a keyset cursor
//!
//! ```rust
//! use strata_sql_core::cursor::{Cursor, MaxValueCursor};
//! use strata_sql_core::dialect::MysqlDialect;
//! use strata_sql_core::query::SelectQuery;
//!
//! let mut cursor = MaxValueCursor::new();
//! cursor.set_boundary(120_i64); // highest id on the previous page
//!
//! let mut query = SelectQuery::new("tasks").order_by("id ASC");
//! cursor.apply(&mut query);
//!
//! let rendered = query.render(&MysqlDialect::new()).unwrap();
//! assert_eq!(
//!     rendered.sql,
//!     "SELECT `tasks`.* FROM `tasks` WHERE id > :w0 ORDER BY id ASC LIMIT 50"
//! );
//! ```

pub mod cursor;
pub mod dialect;
pub mod error;
pub mod query;
pub mod schema;

pub use cursor::{Cursor, CurrentIdsCursor, MaxValueCursor, MinValueCursor, PageCursor};
pub use dialect::{Dialect, MysqlDialect, SqliteDialect};
pub use error::{Result, SqlError};
pub use query::{
    DeleteQuery, InsertQuery, LockMode, LockTablesQuery, Params, RawQuery, Rendered, SelectQuery,
    SetValue, SqlValue, TableLock, ToSqlValue, UnionQuery, UnlockTablesQuery,
};
pub use schema::{DefaultValue, DialectOptions, Field, FieldType, Index, Schema, Table};
