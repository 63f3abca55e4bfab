//! LOCK TABLES / UNLOCK TABLES builders.

use super::params::Params;
use super::Rendered;
use crate::dialect::Dialect;

/// Lock mode for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LockMode {
    /// Shared read lock.
    Read,
    /// Exclusive write lock.
    Write,
}

impl LockMode {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
        }
    }
}

/// One `(table, alias, mode)` lock entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLock {
    /// Table name.
    pub table: String,
    /// Optional alias the lock applies to.
    pub alias: Option<String>,
    /// Lock mode.
    pub mode: LockMode,
}

/// A LOCK TABLES statement accumulating lock entries.
///
/// Adding the same table+alias twice keeps a single entry; a later write
/// lock upgrades an existing read lock, never the other way around. With no
/// entries the query renders to no SQL at all so callers can skip issuing a
/// no-op statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LockTablesQuery {
    locks: Vec<TableLock>,
}

impl LockTablesQuery {
    /// Creates an empty LOCK TABLES query.
    #[must_use]
    pub const fn new() -> Self {
        Self { locks: Vec::new() }
    }

    /// Adds a read lock.
    #[must_use]
    pub fn read(mut self, table: impl Into<String>, alias: Option<&str>) -> Self {
        self.add(table.into(), alias.map(String::from), LockMode::Read);
        self
    }

    /// Adds a write lock.
    #[must_use]
    pub fn write(mut self, table: impl Into<String>, alias: Option<&str>) -> Self {
        self.add(table.into(), alias.map(String::from), LockMode::Write);
        self
    }

    /// Takes the union of two lock sets, upgrading to the stricter mode on
    /// overlap.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for lock in other.locks {
            self.add(lock.table, lock.alias, lock.mode);
        }
        self
    }

    /// Returns the accumulated lock entries.
    #[must_use]
    pub fn locks(&self) -> &[TableLock] {
        &self.locks
    }

    /// Returns whether no tables are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn add(&mut self, table: String, alias: Option<String>, mode: LockMode) {
        if let Some(existing) = self
            .locks
            .iter_mut()
            .find(|l| l.table == table && l.alias == alias)
        {
            existing.mode = existing.mode.max(mode);
            return;
        }
        self.locks.push(TableLock { table, alias, mode });
    }

    /// Renders the statement, or `None` when no tables are registered.
    #[must_use]
    pub fn render(&self, dialect: &dyn Dialect) -> Option<Rendered> {
        if self.locks.is_empty() {
            return None;
        }
        let entries = self
            .locks
            .iter()
            .map(|lock| {
                let mut entry = dialect.escape_identifier(&lock.table);
                if let Some(alias) = &lock.alias {
                    entry.push_str(&format!(" AS {}", dialect.escape_identifier(alias)));
                }
                entry.push(' ');
                entry.push_str(lock.mode.as_sql());
                entry
            })
            .collect::<Vec<_>>()
            .join(", ");

        Some(Rendered {
            sql: format!("LOCK TABLES {entries}"),
            params: Params::new(),
        })
    }
}

/// An UNLOCK TABLES statement; releases every lock held by the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnlockTablesQuery;

impl UnlockTablesQuery {
    /// Creates an UNLOCK TABLES query.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the statement.
    #[must_use]
    pub fn render(&self) -> Rendered {
        Rendered {
            sql: String::from("UNLOCK TABLES"),
            params: Params::new(),
        }
    }
}
