//! Error types for the migration engine.

use strata_sql_core::SqlError;

/// Errors that can occur while planning or applying schema changes.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// The dialect could not express a change (or another builder contract
    /// was violated).
    #[error(transparent)]
    Sql(#[from] SqlError),

    /// A DDL statement was rejected by the database.
    #[error("failed to execute '{sql}': {source}")]
    Execution {
        /// The statement that failed.
        sql: String,
        /// The underlying execution error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A declared or actual schema failed validation.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// Result type for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
