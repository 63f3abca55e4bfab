//! DELETE statement builder.

use super::params::{render_where, Fragment, ParamNamer, Params};
use super::value::SqlValue;
use super::Rendered;
use crate::dialect::Dialect;
use crate::error::Result;

/// A DELETE over one table.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteQuery {
    table: String,
    filters: Vec<Fragment>,
}

impl DeleteQuery {
    /// Creates a DELETE from the given table.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: Vec::new(),
        }
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
        let mut params = Params::new();
        let mut namer = ParamNamer::new("w");
        let mut sql = format!("DELETE FROM {}", dialect.escape_identifier(&self.table));

        let fragments: Vec<&Fragment> = self.filters.iter().collect();
        if let Some(clause) = render_where(&fragments, &mut namer, &mut params)? {
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
    use crate::query::ToSqlValue;

    const DIALECT: MysqlDialect = MysqlDialect::new();

    #[test]
    fn test_delete_all() {
        let rendered = DeleteQuery::new("tasks").render(&DIALECT).unwrap();
        assert_eq!(rendered.sql, "DELETE FROM `tasks`");
    }

    #[test]
    fn test_delete_with_filters() {
        let rendered = DeleteQuery::new("tasks")
            .filter("project_id = ?", vec![3.to_sql_value()])
            .filter("is_active = ?", vec![false.to_sql_value()])
            .render(&DIALECT)
            .unwrap();

        assert_eq!(
            rendered.sql,
            "DELETE FROM `tasks` WHERE (project_id = :w0) AND (is_active = :w1)"
        );
        assert_eq!(rendered.params.len(), 2);
    }
}
