//! Ordered parameter maps and render-time placeholder naming.

use super::value::SqlValue;
use crate::error::{Result, SqlError};

/// Ordered placeholder-name → value map produced by rendering a query.
///
/// Keys are placeholder names without the leading `:`; iteration order is
/// the order placeholders appear in the rendered SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, SqlValue)>,
}

impl Params {
    /// Creates an empty parameter map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a named parameter.
    pub fn push(&mut self, name: impl Into<String>, value: SqlValue) {
        self.entries.push((name.into(), value));
    }

    /// Appends all parameters from another map, preserving order.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterates over `(name, value)` pairs in placeholder order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterates over parameter names in placeholder order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates over values in placeholder order.
    pub fn values(&self) -> impl Iterator<Item = &SqlValue> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A raw SQL fragment paired with the values for its `?` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fragment {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// Assigns placeholder names from a scoped, monotonically increasing
/// counter, e.g. `w0, w1, …` at top level and `u1w0, u1w1, …` inside the
/// second member of a UNION. One namer lives for one render pass, which
/// keeps rendering idempotent while guaranteeing name uniqueness within the
/// statement.
pub(crate) struct ParamNamer {
    scope: String,
    tag: &'static str,
    next: usize,
}

impl ParamNamer {
    pub fn new(tag: &'static str) -> Self {
        Self::scoped("", tag)
    }

    pub fn scoped(scope: impl Into<String>, tag: &'static str) -> Self {
        Self {
            scope: scope.into(),
            tag,
            next: 0,
        }
    }

    pub fn next_name(&mut self) -> String {
        let index = self.next;
        self.next += 1;
        format!("{}{}{index}", self.scope, self.tag)
    }
}

/// Rewrites each `?` in a fragment to a named placeholder drawn from the
/// namer, pushing the corresponding value into `params`.
pub(crate) fn rewrite_placeholders(
    fragment: &Fragment,
    namer: &mut ParamNamer,
    params: &mut Params,
) -> Result<String> {
    let pieces: Vec<&str> = fragment.sql.split('?').collect();
    if pieces.len() - 1 != fragment.values.len() {
        return Err(SqlError::precondition(format!(
            "fragment '{}' has {} placeholder(s) but {} value(s)",
            fragment.sql,
            pieces.len() - 1,
            fragment.values.len()
        )));
    }

    let mut sql = String::from(pieces[0]);
    for (piece, value) in pieces[1..].iter().zip(&fragment.values) {
        let name = namer.next_name();
        sql.push(':');
        sql.push_str(&name);
        sql.push_str(piece);
        params.push(name, value.clone());
    }
    Ok(sql)
}

/// Renders a WHERE clause body from ordered fragments: a single fragment
/// passes through as-is, multiple fragments are parenthesized and
/// AND-joined.
pub(crate) fn render_where(
    fragments: &[&Fragment],
    namer: &mut ParamNamer,
    params: &mut Params,
) -> Result<Option<String>> {
    match fragments {
        [] => Ok(None),
        [single] => Ok(Some(rewrite_placeholders(single, namer, params)?)),
        many => {
            let mut parts = Vec::with_capacity(many.len());
            for fragment in many {
                parts.push(format!(
                    "({})",
                    rewrite_placeholders(fragment, namer, params)?
                ));
            }
            Ok(Some(parts.join(" AND ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(sql: &str, values: Vec<SqlValue>) -> Fragment {
        Fragment {
            sql: sql.to_string(),
            values,
        }
    }

    #[test]
    fn test_rewrite_assigns_sequential_names() {
        let mut namer = ParamNamer::new("w");
        let mut params = Params::new();
        let sql = rewrite_placeholders(
            &fragment("a = ? AND b > ?", vec![SqlValue::Int(1), SqlValue::Int(2)]),
            &mut namer,
            &mut params,
        )
        .unwrap();

        assert_eq!(sql, "a = :w0 AND b > :w1");
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["w0", "w1"]);
    }

    #[test]
    fn test_rewrite_scoped_names() {
        let mut namer = ParamNamer::scoped("u1", "w");
        let mut params = Params::new();
        let sql = rewrite_placeholders(
            &fragment("id = ?", vec![SqlValue::Int(7)]),
            &mut namer,
            &mut params,
        )
        .unwrap();

        assert_eq!(sql, "id = :u1w0");
        assert_eq!(params.get("u1w0"), Some(&SqlValue::Int(7)));
    }

    #[test]
    fn test_rewrite_count_mismatch() {
        let mut namer = ParamNamer::new("w");
        let mut params = Params::new();
        let result = rewrite_placeholders(
            &fragment("a = ? AND b = ?", vec![SqlValue::Int(1)]),
            &mut namer,
            &mut params,
        );
        assert!(matches!(result, Err(SqlError::Precondition(_))));
    }

    #[test]
    fn test_render_where_single_fragment_unparenthesized() {
        let mut namer = ParamNamer::new("w");
        let mut params = Params::new();
        let single = fragment("a = ?", vec![SqlValue::Int(1)]);
        let clause = render_where(&[&single], &mut namer, &mut params).unwrap();
        assert_eq!(clause, Some("a = :w0".to_string()));
    }

    #[test]
    fn test_render_where_multiple_fragments_and_joined() {
        let mut namer = ParamNamer::new("w");
        let mut params = Params::new();
        let first = fragment("a = ?", vec![SqlValue::Int(1)]);
        let second = fragment("b > ?", vec![SqlValue::Int(2)]);
        let clause = render_where(&[&first, &second], &mut namer, &mut params).unwrap();
        assert_eq!(clause, Some("(a = :w0) AND (b > :w1)".to_string()));
        assert_eq!(params.len(), 2);
    }
}
