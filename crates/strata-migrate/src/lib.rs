//! Schema diffing and migration execution.
//!
//! `strata-migrate` reconciles a declared schema against the actual
//! database schema:
//!
//! - **Change** — one atomic schema modification (add/remove/change/rename
//!   field, add/remove/rename index, rename table, create table)
//! - **Planner** — diffs declared vs actual schemas into an ordered change
//!   list (removals before additions, table renames last)
//! - **Engine** — renders each change to DDL through a dialect driver and
//!   executes it through a narrow runner interface, reporting a
//!   [`MigrationResult`] with partial-failure context
//!
//! DDL is frequently non-transactional, so the engine never rolls back:
//! the first failure stops the run and the result names every change that
//! committed before it.
//!
//! # Example
//!
//! ```rust,no_run
//! use sqlx::SqlitePool;
//! use strata_migrate::prelude::*;
//! use strata_sql_core::{Field, Schema, SqliteDialect, Table};
//!
//! # async fn demo(pool: SqlitePool) -> Result<()> {
//! let declared = Schema::new("app").table(
//!     Table::new("tasks")
//!         .field(Field::primary_key("id"))
//!         .field(Field::string("title", 255).not_null()),
//! );
//! let actual = Schema::new("app"); // from the introspection layer
//!
//! let mut engine = MigrationEngine::new(SqliteDialect::new(), pool);
//! let result = engine.sync(&declared, &actual).await?;
//! assert!(result.is_success());
//! # Ok(())
//! # }
//! ```

pub mod change;
pub mod engine;
pub mod error;
pub mod planner;
pub mod result;

pub use change::Change;
pub use engine::{MigrationEngine, SqlRunner};
pub use error::{MigrateError, Result};
pub use planner::MigrationPlanner;
pub use result::MigrationResult;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::change::Change;
    pub use crate::engine::{MigrationEngine, SqlRunner};
    pub use crate::error::{MigrateError, Result};
    pub use crate::planner::MigrationPlanner;
    pub use crate::result::MigrationResult;
}
