//! UNION statement builder.

use super::params::Params;
use super::select::SelectQuery;
use super::Rendered;
use crate::dialect::Dialect;
use crate::error::{Result, SqlError};

/// A UNION of two or more SELECT queries.
///
/// Projection is configured on the members, never on the union itself:
/// `select()` and `add_virtual_field()` fail with
/// [`SqlError::CompositionMisuse`]. Each member renders in its own
/// placeholder scope (`u0`, `u1`, …), so member parameters never collide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnionQuery {
    members: Vec<SelectQuery>,
    limit: Option<u64>,
}

impl UnionQuery {
    /// Creates an empty union.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            members: Vec::new(),
            limit: None,
        }
    }

    /// Appends a member SELECT.
    #[must_use]
    pub fn add(mut self, member: SelectQuery) -> Self {
        self.members.push(member);
        self
    }

    /// Sets a LIMIT on the whole unioned expression.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Rejected: the union has no projection of its own.
    pub fn select(&mut self, _columns: &[&str]) -> Result<()> {
        Err(SqlError::CompositionMisuse {
            operation: "select",
        })
    }

    /// Rejected: virtual fields belong to the member SELECTs.
    pub fn add_virtual_field(&mut self, _expression: &str, _alias: &str) -> Result<()> {
        Err(SqlError::CompositionMisuse {
            operation: "add_virtual_field",
        })
    }

    /// Renders the statement for the given dialect.
    ///
    /// Member queries are concatenated with ` UNION `; with a LIMIT the
    /// whole unioned expression is parenthesized first.
    pub fn render(&self, dialect: &dyn Dialect) -> Result<Rendered> {
        if self.members.is_empty() {
            return Err(SqlError::precondition(
                "UNION requires at least one member SELECT",
            ));
        }

        let mut params = Params::new();
        let mut parts = Vec::with_capacity(self.members.len());
        for (position, member) in self.members.iter().enumerate() {
            let rendered = member.render_scoped(dialect, &format!("u{position}"))?;
            parts.push(rendered.sql);
            params.extend(rendered.params);
        }

        let mut sql = parts.join(" UNION ");
        if let Some(n) = self.limit {
            sql = format!("({sql}) LIMIT {n}");
        }
        Ok(Rendered { sql, params })
    }
}
