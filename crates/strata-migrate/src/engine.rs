//! Migration engine.
//!
//! Renders each [`Change`] to DDL through the dialect driver and executes
//! the statements in order through a narrow runner interface. The first
//! failure stops the run; nothing already applied is rolled back, and the
//! [`MigrationResult`] reports exactly how far the run got.

use std::future::Future;

use tracing::{debug, info, warn};

use strata_sql_core::dialect::Dialect;
use strata_sql_core::query::{Params, SqlValue};
use strata_sql_core::Schema;

use crate::change::Change;
use crate::error::{MigrateError, Result};
use crate::planner::MigrationPlanner;
use crate::result::MigrationResult;

/// Narrow execution interface the engine drives.
///
/// Implemented by the caller's connection layer; the engine never opens,
/// pools, or closes connections itself.
pub trait SqlRunner {
    /// Execution error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Executes one statement, returning the affected row count.
    fn execute(
        &mut self,
        sql: &str,
        params: &Params,
    ) -> impl Future<Output = std::result::Result<u64, Self::Error>> + Send;
}

impl SqlRunner for sqlx::SqlitePool {
    type Error = sqlx::Error;

    async fn execute(
        &mut self,
        sql: &str,
        params: &Params,
    ) -> std::result::Result<u64, sqlx::Error> {
        let mut query = sqlx::query(sql);
        for (_, value) in params.iter() {
            query = match value {
                SqlValue::Null => query.bind(None::<i64>),
                SqlValue::Bool(b) => query.bind(*b),
                SqlValue::Int(i) => query.bind(*i),
                SqlValue::Float(f) => query.bind(*f),
                SqlValue::Text(s) => query.bind(s.clone()),
                SqlValue::Blob(b) => query.bind(b.clone()),
            };
        }
        let result = query.execute(&*self).await?;
        Ok(result.rows_affected())
    }
}

/// Applies schema changes against a live connection.
///
/// Execution is strictly sequential on one runner with no internal retries
/// and no cancellation once a run has started; transient failures must be
/// retried by the caller after inspecting the failed result's applied list.
pub struct MigrationEngine<D, R> {
    dialect: D,
    runner: R,
}

impl<D: Dialect, R: SqlRunner> MigrationEngine<D, R> {
    /// Creates an engine over a dialect and a runner.
    pub const fn new(dialect: D, runner: R) -> Self {
        Self { dialect, runner }
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Returns the runner.
    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Renders one change to its DDL statement without executing it.
    ///
    /// A dialect capability gap surfaces here as
    /// [`MigrateError::Sql`] and aborts a run exactly like an execution
    /// failure would.
    pub fn render_change(&self, change: &Change) -> Result<String> {
        let sql = match change {
            Change::CreateTable { table } => {
                self.dialect.create_table_builder().create_table(table)?
            }
            Change::AddField { table, field } => self
                .dialect
                .alter_table_builder()
                .add_field(table, field)?,
            Change::RemoveField { table, field } => self
                .dialect
                .alter_table_builder()
                .remove_field(table, field)?,
            Change::ChangeField { table, old, new } => self
                .dialect
                .alter_table_builder()
                .change_field(table, old, new)?,
            Change::RenameField {
                table,
                old_name,
                new,
            } => self
                .dialect
                .alter_table_builder()
                .rename_field(table, old_name, new)?,
            Change::AddIndex { table, index } => self
                .dialect
                .alter_table_builder()
                .add_index(table, index)?,
            Change::RemoveIndex { table, index } => self
                .dialect
                .alter_table_builder()
                .remove_index(table, index)?,
            Change::RenameIndex {
                table,
                old_name,
                new_name,
            } => self
                .dialect
                .alter_table_builder()
                .rename_index(table, old_name, new_name)?,
            Change::RenameTable { old_name, new_name } => self
                .dialect
                .alter_table_builder()
                .rename_table(old_name, new_name)?,
        };
        Ok(sql)
    }

    /// Applies the changes in order, stopping at the first failure.
    pub async fn run(&mut self, changes: Vec<Change>) -> MigrationResult {
        let mut applied = Vec::with_capacity(changes.len());
        for change in changes {
            debug!(change = %change.describe(), "applying schema change");
            if let Err(error) = self.apply_change(&change).await {
                warn!(
                    change = %change.describe(),
                    applied = applied.len(),
                    error = %error,
                    "migration aborted"
                );
                return MigrationResult::Failure {
                    applied,
                    failed: change,
                    error,
                };
            }
            applied.push(change);
        }
        info!(applied = applied.len(), "schema migration complete");
        MigrationResult::Success { applied }
    }

    /// Plans the declared-vs-actual diff and applies it in one call.
    pub async fn sync(&mut self, declared: &Schema, actual: &Schema) -> Result<MigrationResult> {
        let changes = MigrationPlanner::new().plan(declared, actual)?;
        info!(changes = changes.len(), "planned schema changes");
        Ok(self.run(changes).await)
    }

    async fn apply_change(&mut self, change: &Change) -> Result<()> {
        let sql = self.render_change(change)?;
        debug!(sql = %sql, "executing DDL");
        match self.runner.execute(&sql, &Params::new()).await {
            Ok(_) => Ok(()),
            Err(source) => Err(MigrateError::Execution {
                sql,
                source: Box::new(source),
            }),
        }
    }
}
