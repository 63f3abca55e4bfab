//! Schema change primitives.
//!
//! A [`Change`] is one atomic schema-modification instruction, produced by
//! the planner or constructed directly by callers (renames cannot be
//! inferred from a by-name diff). Each variant carries only the data needed
//! to render it.

use serde::{Deserialize, Serialize};
use strata_sql_core::{Field, Index, Table};

/// One atomic schema modification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Change {
    /// Create a table that exists only in the declared schema.
    CreateTable {
        /// The table to create.
        table: Table,
    },
    /// Add a field to an existing table.
    AddField {
        /// Table name.
        table: String,
        /// The field to add.
        field: Field,
    },
    /// Remove a field from a table.
    RemoveField {
        /// Table name.
        table: String,
        /// The field to remove.
        field: Field,
    },
    /// Change a field's type, nullability, or default.
    ChangeField {
        /// Table name.
        table: String,
        /// The field as currently present.
        old: Field,
        /// The field as declared.
        new: Field,
    },
    /// Rename a field.
    RenameField {
        /// Table name.
        table: String,
        /// Current field name.
        old_name: String,
        /// The field under its new name.
        new: Field,
    },
    /// Add an index to a table.
    AddIndex {
        /// Table name.
        table: String,
        /// The index to add.
        index: Index,
    },
    /// Remove an index from a table.
    RemoveIndex {
        /// Table name.
        table: String,
        /// The index to remove.
        index: Index,
    },
    /// Rename an index.
    RenameIndex {
        /// Table name.
        table: String,
        /// Current index name.
        old_name: String,
        /// New index name.
        new_name: String,
    },
    /// Rename a table.
    RenameTable {
        /// Current table name.
        old_name: String,
        /// New table name.
        new_name: String,
    },
}

impl Change {
    /// Creates an add-field change.
    #[must_use]
    pub fn add_field(table: impl Into<String>, field: Field) -> Self {
        Self::AddField {
            table: table.into(),
            field,
        }
    }

    /// Creates a remove-field change.
    #[must_use]
    pub fn remove_field(table: impl Into<String>, field: Field) -> Self {
        Self::RemoveField {
            table: table.into(),
            field,
        }
    }

    /// Creates a change-field change.
    #[must_use]
    pub fn change_field(table: impl Into<String>, old: Field, new: Field) -> Self {
        Self::ChangeField {
            table: table.into(),
            old,
            new,
        }
    }

    /// Creates a rename-field change.
    #[must_use]
    pub fn rename_field(table: impl Into<String>, old_name: impl Into<String>, new: Field) -> Self {
        Self::RenameField {
            table: table.into(),
            old_name: old_name.into(),
            new,
        }
    }

    /// Creates an add-index change.
    #[must_use]
    pub fn add_index(table: impl Into<String>, index: Index) -> Self {
        Self::AddIndex {
            table: table.into(),
            index,
        }
    }

    /// Creates a remove-index change.
    #[must_use]
    pub fn remove_index(table: impl Into<String>, index: Index) -> Self {
        Self::RemoveIndex {
            table: table.into(),
            index,
        }
    }

    /// Creates a rename-index change.
    #[must_use]
    pub fn rename_index(
        table: impl Into<String>,
        old_name: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Self {
        Self::RenameIndex {
            table: table.into(),
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }

    /// Creates a rename-table change.
    #[must_use]
    pub fn rename_table(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self::RenameTable {
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }

    /// Fixed application rank: removals first (indexes before the fields
    /// they cover), then field additions and changes, then index additions,
    /// table renames last. Guarantees no change references a
    /// not-yet-created column and no still-indexed column is dropped.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::CreateTable { .. } => 0,
            Self::RemoveIndex { .. } => 1,
            Self::RemoveField { .. } => 2,
            Self::AddField { .. } => 3,
            Self::ChangeField { .. } => 4,
            Self::RenameField { .. } => 5,
            Self::AddIndex { .. } => 6,
            Self::RenameIndex { .. } => 7,
            Self::RenameTable { .. } => 8,
        }
    }

    /// Short human-readable description for logs and failure reports.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::CreateTable { table } => format!("create table '{}'", table.name),
            Self::AddField { table, field } => {
                format!("add field '{}.{}'", table, field.name)
            }
            Self::RemoveField { table, field } => {
                format!("remove field '{}.{}'", table, field.name)
            }
            Self::ChangeField { table, new, .. } => {
                format!("change field '{}.{}'", table, new.name)
            }
            Self::RenameField {
                table,
                old_name,
                new,
            } => format!("rename field '{}.{}' to '{}'", table, old_name, new.name),
            Self::AddIndex { table, index } => {
                format!("add index '{}' on '{}'", index.name, table)
            }
            Self::RemoveIndex { table, index } => {
                format!("remove index '{}' from '{}'", index.name, table)
            }
            Self::RenameIndex {
                table,
                old_name,
                new_name,
            } => format!("rename index '{old_name}' to '{new_name}' on '{table}'"),
            Self::RenameTable { old_name, new_name } => {
                format!("rename table '{old_name}' to '{new_name}'")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_sql_core::Field;

    #[test]
    fn test_rank_orders_removals_before_additions() {
        let remove_index = Change::remove_index(
            "tasks",
            Index::new("idx_status", vec!["status".to_string()]),
        );
        let add_field = Change::add_field("tasks", Field::boolean("archived"));
        assert!(remove_index.rank() < add_field.rank());
    }

    #[test]
    fn test_rename_table_ranks_last() {
        let rename = Change::rename_table("tasks", "jobs");
        let add_index = Change::add_index(
            "tasks",
            Index::new("idx_status", vec!["status".to_string()]),
        );
        assert!(add_index.rank() < rename.rank());
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            Change::add_field("tasks", Field::boolean("archived")).describe(),
            "add field 'tasks.archived'"
        );
        assert_eq!(
            Change::rename_table("tasks", "jobs").describe(),
            "rename table 'tasks' to 'jobs'"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let change = Change::change_field(
            "tasks",
            Field::string("title", 100),
            Field::string("title", 255).not_null(),
        );
        let json = serde_json::to_string(&change).unwrap();
        let back: Change = serde_json::from_str(&json).unwrap();
        assert_eq!(change, back);
    }
}
