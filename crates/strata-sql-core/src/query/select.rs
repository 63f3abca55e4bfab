//! SELECT statement builder.

use super::params::{render_where, Fragment, ParamNamer, Params};
use super::value::SqlValue;
use super::Rendered;
use crate::dialect::Dialect;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
struct Join {
    kind: &'static str,
    table: String,
    on: String,
}

/// A SELECT query over one table.
///
/// Mutable builder: construct, chain builder calls, then render any number
/// of times. Rendering never mutates the builder, so repeated renders of
/// unchanged state are byte-identical. Cursors mutate the dedicated
/// LIMIT/OFFSET/cursor-filter slots through the `set_*` methods.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    table: String,
    alias: Option<String>,
    primary_key: String,
    columns: Vec<String>,
    virtual_fields: Vec<(String, String)>,
    joins: Vec<Join>,
    filters: Vec<Fragment>,
    cursor_filter: Option<Fragment>,
    group_by: Vec<String>,
    order_by: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl SelectQuery {
    /// Creates a SELECT over the given table.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: None,
            primary_key: String::from("id"),
            columns: Vec::new(),
            virtual_fields: Vec::new(),
            joins: Vec::new(),
            filters: Vec::new(),
            cursor_filter: None,
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Sets the table alias used for the default projection and FROM clause.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Overrides the primary-key column name (default `id`).
    ///
    /// Boundary cursors fall back to this when no field was configured.
    #[must_use]
    pub fn with_primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = name.into();
        self
    }

    /// Replaces the projection with an explicit column list (raw SQL).
    #[must_use]
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| String::from(*c)).collect();
        self
    }

    /// Adds a computed/aliased SELECT expression.
    #[must_use]
    pub fn add_virtual_field(
        mut self,
        expression: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        self.virtual_fields.push((expression.into(), alias.into()));
        self
    }

    /// Adds an INNER JOIN.
    #[must_use]
    pub fn join(mut self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.joins.push(Join {
            kind: "INNER JOIN",
            table: table.into(),
            on: on.into(),
        });
        self
    }

    /// Adds a LEFT JOIN.
    #[must_use]
    pub fn left_join(mut self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.joins.push(Join {
            kind: "LEFT JOIN",
            table: table.into(),
            on: on.into(),
        });
        self
    }

    /// Adds a WHERE fragment (raw SQL with `?` positional placeholders).
    ///
    /// Fragments are parenthesized and AND-joined when more than one is
    /// present; `?` placeholders are rewritten to uniquely named ones at
    /// render time.
    #[must_use]
    pub fn filter(mut self, fragment: impl Into<String>, values: Vec<SqlValue>) -> Self {
        self.filters.push(Fragment {
            sql: fragment.into(),
            values,
        });
        self
    }

    /// Adds a GROUP BY fragment (raw SQL).
    #[must_use]
    pub fn group_by(mut self, fragment: impl Into<String>) -> Self {
        self.group_by.push(fragment.into());
        self
    }

    /// Adds an ORDER BY fragment (raw SQL, e.g. `id ASC`).
    #[must_use]
    pub fn order_by(mut self, fragment: impl Into<String>) -> Self {
        self.order_by.push(fragment.into());
        self
    }

    /// Sets the LIMIT.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets the OFFSET.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Sets the LIMIT in place.
    pub fn set_limit(&mut self, n: u64) {
        self.limit = Some(n);
    }

    /// Sets the OFFSET in place.
    pub fn set_offset(&mut self, n: u64) {
        self.offset = Some(n);
    }

    /// Replaces the cursor filter slot.
    ///
    /// Cursors write here instead of appending to the ordinary WHERE
    /// fragments so that re-applying a cursor replaces its previous filter
    /// rather than stacking duplicates.
    pub fn set_cursor_filter(&mut self, fragment: impl Into<String>, values: Vec<SqlValue>) {
        self.cursor_filter = Some(Fragment {
            sql: fragment.into(),
            values,
        });
    }

    /// Returns the primary-key column name.
    #[must_use]
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Renders the statement for the given dialect.
    pub fn render(&self, dialect: &dyn Dialect) -> Result<Rendered> {
        self.render_scoped(dialect, "")
    }

    /// Renders with a placeholder-name scope prefix (`u0`, `u1`, … for
    /// UNION members).
    pub(crate) fn render_scoped(&self, dialect: &dyn Dialect, scope: &str) -> Result<Rendered> {
        let mut params = Params::new();
        let mut namer = ParamNamer::scoped(scope, "w");

        let source = self.alias.as_ref().unwrap_or(&self.table);
        let mut projection = if self.columns.is_empty() {
            format!("{}.*", dialect.escape_identifier(source))
        } else {
            self.columns.join(", ")
        };
        for (expression, alias) in &self.virtual_fields {
            projection.push_str(&format!(
                ", {expression} AS {}",
                dialect.escape_identifier(alias)
            ));
        }

        let mut sql = format!(
            "SELECT {projection} FROM {}",
            dialect.escape_identifier(&self.table)
        );
        if let Some(alias) = &self.alias {
            sql.push_str(&format!(" AS {}", dialect.escape_identifier(alias)));
        }

        for join in &self.joins {
            sql.push_str(&format!(
                " {} {} ON {}",
                join.kind,
                dialect.escape_identifier(&join.table),
                join.on
            ));
        }

        let mut fragments: Vec<&Fragment> = self.filters.iter().collect();
        if let Some(cursor_filter) = &self.cursor_filter {
            fragments.push(cursor_filter);
        }
        if let Some(clause) = render_where(&fragments, &mut namer, &mut params)? {
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }
        if let Some(n) = self.limit {
            sql.push_str(&format!(" LIMIT {n}"));
        }
        if let Some(n) = self.offset {
            sql.push_str(&format!(" OFFSET {n}"));
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
    fn test_default_projection() {
        let rendered = SelectQuery::new("projects").render(&DIALECT).unwrap();
        assert_eq!(rendered.sql, "SELECT `projects`.* FROM `projects`");
        assert!(rendered.params.is_empty());
    }

    #[test]
    fn test_alias_projection() {
        let rendered = SelectQuery::new("projects")
            .alias("p")
            .render(&DIALECT)
            .unwrap();
        assert_eq!(rendered.sql, "SELECT `p`.* FROM `projects` AS `p`");
    }

    #[test]
    fn test_explicit_columns() {
        let rendered = SelectQuery::new("projects")
            .select(&["id", "name"])
            .render(&DIALECT)
            .unwrap();
        assert_eq!(rendered.sql, "SELECT id, name FROM `projects`");
    }

    #[test]
    fn test_virtual_field() {
        let rendered = SelectQuery::new("projects")
            .alias("p")
            .add_virtual_field("COUNT(t.id)", "task_count")
            .render(&DIALECT)
            .unwrap();
        assert_eq!(
            rendered.sql,
            "SELECT `p`.*, COUNT(t.id) AS `task_count` FROM `projects` AS `p`"
        );
    }

    #[test]
    fn test_single_filter_not_parenthesized() {
        let rendered = SelectQuery::new("projects")
            .filter("name = ?", vec!["alpha".to_sql_value()])
            .render(&DIALECT)
            .unwrap();
        assert_eq!(
            rendered.sql,
            "SELECT `projects`.* FROM `projects` WHERE name = :w0"
        );
        assert_eq!(rendered.params.get("w0"), Some(&SqlValue::Text("alpha".into())));
    }

    #[test]
    fn test_multiple_filters_and_joined() {
        let rendered = SelectQuery::new("projects")
            .filter("name = ?", vec!["alpha".to_sql_value()])
            .filter("is_active = ?", vec![true.to_sql_value()])
            .render(&DIALECT)
            .unwrap();
        assert_eq!(
            rendered.sql,
            "SELECT `projects`.* FROM `projects` WHERE (name = :w0) AND (is_active = :w1)"
        );
    }

    #[test]
    fn test_joins() {
        let rendered = SelectQuery::new("projects")
            .alias("p")
            .left_join("tasks", "tasks.project_id = p.id")
            .render(&DIALECT)
            .unwrap();
        assert_eq!(
            rendered.sql,
            "SELECT `p`.* FROM `projects` AS `p` LEFT JOIN `tasks` ON tasks.project_id = p.id"
        );
    }

    #[test]
    fn test_clause_ordering() {
        let rendered = SelectQuery::new("tasks")
            .filter("project_id = ?", vec![3.to_sql_value()])
            .group_by("status")
            .order_by("status ASC")
            .limit(10)
            .offset(20)
            .render(&DIALECT)
            .unwrap();
        assert_eq!(
            rendered.sql,
            "SELECT `tasks`.* FROM `tasks` WHERE project_id = :w0 \
             GROUP BY status ORDER BY status ASC LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let query = SelectQuery::new("tasks")
            .filter("a = ?", vec![1.to_sql_value()])
            .filter("b = ?", vec![2.to_sql_value()])
            .order_by("id ASC");
        let first = query.render(&DIALECT).unwrap();
        let second = query.render(&DIALECT).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cursor_filter_replaces() {
        let mut query = SelectQuery::new("tasks");
        query.set_cursor_filter("id > ?", vec![10.to_sql_value()]);
        query.set_cursor_filter("id > ?", vec![20.to_sql_value()]);
        let rendered = query.render(&DIALECT).unwrap();
        assert_eq!(
            rendered.sql,
            "SELECT `tasks`.* FROM `tasks` WHERE id > :w0"
        );
        assert_eq!(rendered.params.get("w0"), Some(&SqlValue::Int(20)));
    }
}
