//! INSERT statement builder.

use super::params::{ParamNamer, Params};
use super::value::ToSqlValue;
use super::{Rendered, SetValue};
use crate::dialect::Dialect;
use crate::error::{Result, SqlError};

/// An INSERT over one table.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertQuery {
    table: String,
    assignments: Vec<(String, SetValue)>,
}

impl InsertQuery {
    /// Creates an INSERT into the given table.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            assignments: Vec::new(),
        }
    }

    /// Inserts a bound scalar value into a column.
    #[must_use]
    pub fn value(mut self, column: impl Into<String>, value: impl ToSqlValue) -> Self {
        self.assignments
            .push((column.into(), SetValue::Value(value.to_sql_value())));
        self
    }

    /// Inserts the value of another column (rendered as a bare identifier,
    /// not a placeholder).
    #[must_use]
    pub fn field(mut self, column: impl Into<String>, source_column: impl Into<String>) -> Self {
        self.assignments
            .push((column.into(), SetValue::Field(source_column.into())));
        self
    }

    /// Renders the statement for the given dialect.
    pub fn render(&self, dialect: &dyn Dialect) -> Result<Rendered> {
        if self.assignments.is_empty() {
            return Err(SqlError::precondition(format!(
                "INSERT INTO '{}' requires at least one column",
                self.table
            )));
        }

        let mut params = Params::new();
        let mut namer = ParamNamer::new("v");
        let mut columns = Vec::with_capacity(self.assignments.len());
        let mut values = Vec::with_capacity(self.assignments.len());

        for (column, value) in &self.assignments {
            columns.push(dialect.escape_identifier(column));
            match value {
                SetValue::Value(scalar) => {
                    let name = namer.next_name();
                    values.push(format!(":{name}"));
                    params.push(name, scalar.clone());
                }
                SetValue::Field(source) => values.push(dialect.escape_identifier(source)),
            }
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            dialect.escape_identifier(&self.table),
            columns.join(", "),
            values.join(", ")
        );
        Ok(Rendered { sql, params })
    }
}
