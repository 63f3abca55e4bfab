//! Raw passthrough statements.

use super::params::Params;
use super::value::ToSqlValue;
use super::Rendered;

/// Opaque SQL with an explicit parameter map, for statements outside the
/// builders' expressiveness.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuery {
    sql: String,
    params: Params,
}

impl RawQuery {
    /// Creates a raw query.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Params::new(),
        }
    }

    /// Binds a named parameter.
    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, value: impl ToSqlValue) -> Self {
        self.params.push(name, value.to_sql_value());
        self
    }

    /// Renders the statement, passing SQL and parameters through untouched.
    #[must_use]
    pub fn render(&self) -> Rendered {
        Rendered {
            sql: self.sql.clone(),
            params: self.params.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SqlValue;

    #[test]
    fn test_passthrough() {
        let rendered = RawQuery::new("SELECT COUNT(*) FROM tasks WHERE status = :status")
            .bind("status", 2)
            .render();

        assert_eq!(
            rendered.sql,
            "SELECT COUNT(*) FROM tasks WHERE status = :status"
        );
        assert_eq!(rendered.params.get("status"), Some(&SqlValue::Int(2)));
    }
}
