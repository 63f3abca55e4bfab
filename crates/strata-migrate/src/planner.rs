//! Schema diff planner.
//!
//! Compares a declared schema against the actual database schema and
//! produces the ordered list of [`Change`]s needed to reconcile them.

use std::collections::HashMap;

use strata_sql_core::{Field, Index, Schema, Table};

use crate::change::Change;
use crate::error::{MigrateError, Result};

/// Computes the changes between a declared and an actual schema.
///
/// Tables present only in the declared schema are created; tables present
/// only in the actual schema are left alone — dropping data requires an
/// explicit decision outside this planner. Fields and indexes are diffed by
/// name, so renames are never inferred: a renamed field shows up as a
/// remove plus an add unless the caller supplies an explicit rename change.
#[derive(Debug, Clone, Copy, Default)]
pub struct MigrationPlanner;

impl MigrationPlanner {
    /// Creates a new planner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Plans the ordered change list turning `actual` into `declared`.
    pub fn plan(&self, declared: &Schema, actual: &Schema) -> Result<Vec<Change>> {
        declared
            .validate()
            .map_err(|e| MigrateError::InvalidSchema(e.to_string()))?;
        actual
            .validate()
            .map_err(|e| MigrateError::InvalidSchema(e.to_string()))?;

        let actual_tables: HashMap<&str, &Table> =
            actual.tables.iter().map(|t| (t.name.as_str(), t)).collect();

        let mut changes = Vec::new();
        for table in &declared.tables {
            match actual_tables.get(table.name.as_str()) {
                None => changes.push(Change::CreateTable {
                    table: table.clone(),
                }),
                Some(actual_table) => changes.extend(self.diff_table(table, actual_table)),
            }
        }

        changes.sort_by_key(Change::rank);
        Ok(changes)
    }

    /// Plans changes for one explicitly matched table pair, appending a
    /// table rename when the names differ.
    #[must_use]
    pub fn plan_table(&self, declared: &Table, actual: &Table) -> Vec<Change> {
        let mut changes = self.diff_table(declared, actual);
        changes.sort_by_key(Change::rank);
        if declared.name != actual.name {
            changes.push(Change::rename_table(&actual.name, &declared.name));
        }
        changes
    }

    fn diff_table(&self, declared: &Table, actual: &Table) -> Vec<Change> {
        let mut changes = Vec::new();
        let table_name = &declared.name;

        let declared_fields: HashMap<&str, &Field> = declared
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f))
            .collect();
        let actual_fields: HashMap<&str, &Field> =
            actual.fields.iter().map(|f| (f.name.as_str(), f)).collect();

        // Iterate declaration order rather than hash order so plans are
        // deterministic.
        for field in &actual.fields {
            if !declared_fields.contains_key(field.name.as_str()) {
                changes.push(Change::remove_field(table_name, field.clone()));
            }
        }
        for field in &declared.fields {
            match actual_fields.get(field.name.as_str()) {
                None => changes.push(Change::add_field(table_name, field.clone())),
                Some(actual_field) if *actual_field != field => {
                    changes.push(Change::change_field(
                        table_name,
                        (*actual_field).clone(),
                        field.clone(),
                    ));
                }
                Some(_) => {}
            }
        }

        let declared_indexes: HashMap<&str, &Index> = declared
            .indexes
            .iter()
            .map(|i| (i.name.as_str(), i))
            .collect();
        let actual_indexes: HashMap<&str, &Index> = actual
            .indexes
            .iter()
            .map(|i| (i.name.as_str(), i))
            .collect();

        for index in &actual.indexes {
            if !declared_indexes.contains_key(index.name.as_str()) {
                changes.push(Change::remove_index(table_name, index.clone()));
            }
        }
        for index in &declared.indexes {
            match actual_indexes.get(index.name.as_str()) {
                None => changes.push(Change::add_index(table_name, index.clone())),
                Some(actual_index) if *actual_index != index => {
                    // Field set or uniqueness changed: recreate the index.
                    changes.push(Change::remove_index(table_name, (*actual_index).clone()));
                    changes.push(Change::add_index(table_name, index.clone()));
                }
                Some(_) => {}
            }
        }

        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_sql_core::FieldType;

    fn base_table() -> Table {
        Table::new("tasks")
            .field(Field::primary_key("id"))
            .field(Field::string("title", 255).not_null())
    }

    #[test]
    fn test_identical_schemas_produce_no_changes() {
        let declared = Schema::new("app").table(base_table());
        let actual = Schema::new("app").table(base_table());
        assert!(MigrationPlanner::new().plan(&declared, &actual).unwrap().is_empty());
    }

    #[test]
    fn test_missing_table_is_created() {
        let declared = Schema::new("app").table(base_table());
        let actual = Schema::new("app");

        let changes = MigrationPlanner::new().plan(&declared, &actual).unwrap();
        assert_eq!(changes.len(), 1);
        assert!(matches!(&changes[0], Change::CreateTable { table } if table.name == "tasks"));
    }

    #[test]
    fn test_extra_actual_table_is_not_dropped() {
        let declared = Schema::new("app");
        let actual = Schema::new("app").table(base_table());
        assert!(MigrationPlanner::new().plan(&declared, &actual).unwrap().is_empty());
    }

    #[test]
    fn test_added_field_and_removed_index_order() {
        // Declared adds one field and drops one index relative to actual;
        // the removal must come first.
        let declared = Schema::new("app").table(base_table().field(Field::boolean("archived")));
        let actual = Schema::new("app").table(
            base_table().index(Index::new("idx_title", vec!["title".to_string()])),
        );

        let changes = MigrationPlanner::new().plan(&declared, &actual).unwrap();
        assert_eq!(changes.len(), 2);
        assert!(matches!(&changes[0], Change::RemoveIndex { index, .. } if index.name == "idx_title"));
        assert!(matches!(&changes[1], Change::AddField { field, .. } if field.name == "archived"));
    }

    #[test]
    fn test_type_change_is_detected() {
        let declared = Schema::new("app").table(
            Table::new("tasks")
                .field(Field::primary_key("id"))
                .field(Field::text("title").not_null()),
        );
        let actual = Schema::new("app").table(base_table());

        let changes = MigrationPlanner::new().plan(&declared, &actual).unwrap();
        assert_eq!(changes.len(), 1);
        match &changes[0] {
            Change::ChangeField { old, new, .. } => {
                assert_eq!(old.field_type, FieldType::String(255));
                assert_eq!(new.field_type, FieldType::Text);
            }
            other => panic!("expected ChangeField, got {other:?}"),
        }
    }

    #[test]
    fn test_nullability_change_is_detected() {
        let declared = Schema::new("app").table(
            Table::new("tasks")
                .field(Field::primary_key("id"))
                .field(Field::string("title", 255)),
        );
        let actual = Schema::new("app").table(base_table());

        let changes = MigrationPlanner::new().plan(&declared, &actual).unwrap();
        assert!(matches!(&changes[0], Change::ChangeField { new, .. } if new.nullable));
    }

    #[test]
    fn test_index_field_set_change_recreates() {
        let declared = Schema::new("app").table(base_table().index(
            Index::new("idx_title", vec!["title".to_string(), "id".to_string()]),
        ));
        let actual = Schema::new("app").table(
            base_table().index(Index::new("idx_title", vec!["title".to_string()])),
        );

        let changes = MigrationPlanner::new().plan(&declared, &actual).unwrap();
        assert_eq!(changes.len(), 2);
        assert!(matches!(&changes[0], Change::RemoveIndex { .. }));
        assert!(matches!(&changes[1], Change::AddIndex { index, .. } if index.fields.len() == 2));
    }

    #[test]
    fn test_plan_table_appends_rename() {
        let declared = Table::new("jobs")
            .field(Field::primary_key("id"))
            .field(Field::boolean("urgent"));
        let actual = Table::new("tasks").field(Field::primary_key("id"));

        let changes = MigrationPlanner::new().plan_table(&declared, &actual);
        assert_eq!(changes.len(), 2);
        assert!(matches!(&changes[0], Change::AddField { field, .. } if field.name == "urgent"));
        assert!(matches!(
            &changes[1],
            Change::RenameTable { old_name, new_name }
                if old_name == "tasks" && new_name == "jobs"
        ));
    }

    #[test]
    fn test_invalid_schema_is_rejected() {
        let declared = Schema::new("app")
            .table(Table::new("tasks"))
            .table(Table::new("tasks"));
        let actual = Schema::new("app");

        let result = MigrationPlanner::new().plan(&declared, &actual);
        assert!(matches!(result, Err(MigrateError::InvalidSchema(_))));
    }
}
