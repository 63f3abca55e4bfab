//! UPDATE statement builder.

use super::params::{render_where, Fragment, ParamNamer, Params};
use super::value::{SqlValue, ToSqlValue};
use super::{Rendered, SetValue};
use crate::dialect::Dialect;
use crate::error::{Result, SqlError};

/// An UPDATE over one table.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateQuery {
    table: String,
    assignments: Vec<(String, SetValue)>,
    filters: Vec<Fragment>,
}

impl UpdateQuery {
    /// Creates an UPDATE of the given table.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            assignments: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Assigns a bound scalar value to a column.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl ToSqlValue) -> Self {
        self.assignments
            .push((column.into(), SetValue::Value(value.to_sql_value())));
        self
    }

    /// Assigns another column's value (rendered as a bare identifier).
    #[must_use]
    pub fn set_field(
        mut self,
        column: impl Into<String>,
        source_column: impl Into<String>,
    ) -> Self {
        self.assignments
            .push((column.into(), SetValue::Field(source_column.into())));
        self
    }

    /// Adds a WHERE fragment; same composition rules as SELECT.
    #[must_use]
    pub fn filter(mut self, fragment: impl Into<String>, values: Vec<SqlValue>) -> Self {
        self.filters.push(Fragment {
            sql: fragment.into(),
            values,
        });
        self
    }

    /// Renders the statement for the given dialect.
    pub fn render(&self, dialect: &dyn Dialect) -> Result<Rendered> {
        if self.assignments.is_empty() {
            return Err(SqlError::precondition(format!(
                "UPDATE '{}' requires at least one assignment",
                self.table
            )));
        }

        let mut params = Params::new();
        let mut set_namer = ParamNamer::new("s");
        let mut assignments = Vec::with_capacity(self.assignments.len());

        for (column, value) in &self.assignments {
            let target = dialect.escape_identifier(column);
            match value {
                SetValue::Value(scalar) => {
                    let name = set_namer.next_name();
                    assignments.push(format!("{target} = :{name}"));
                    params.push(name, scalar.clone());
                }
                SetValue::Field(source) => {
                    assignments.push(format!("{target} = {}", dialect.escape_identifier(source)));
                }
            }
        }

        let mut sql = format!(
            "UPDATE {} SET {}",
            dialect.escape_identifier(&self.table),
            assignments.join(", ")
        );

        let fragments: Vec<&Fragment> = self.filters.iter().collect();
        let mut where_namer = ParamNamer::new("w");
        if let Some(clause) = render_where(&fragments, &mut where_namer, &mut params)? {
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
        }

        Ok(Rendered { sql, params })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MysqlDialect;

    const DIALECT: MysqlDialect = MysqlDialect::new();

    #[test]
    fn test_update_with_filter() {
        let rendered = UpdateQuery::new("tasks")
            .set("title", "renamed")
            .set("is_active", false)
            .filter("id = ?", vec![7.to_sql_value()])
            .render(&DIALECT)
            .unwrap();

        assert_eq!(
            rendered.sql,
            "UPDATE `tasks` SET `title` = :s0, `is_active` = :s1 WHERE id = :w0"
        );
        assert_eq!(
            rendered.params.names().collect::<Vec<_>>(),
            vec!["s0", "s1", "w0"]
        );
    }

    #[test]
    fn test_update_field_reference() {
        let rendered = UpdateQuery::new("tasks")
            .set_field("position", "previous_position")
            .render(&DIALECT)
            .unwrap();

        assert_eq!(
            rendered.sql,
            "UPDATE `tasks` SET `position` = `previous_position`"
        );
        assert!(rendered.params.is_empty());
    }

    #[test]
    fn test_update_without_assignments() {
        let result = UpdateQuery::new("tasks").render(&DIALECT);
        assert!(matches!(result, Err(SqlError::Precondition(_))));
    }
}
