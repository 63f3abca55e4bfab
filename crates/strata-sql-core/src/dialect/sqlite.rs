//! Embedded-file (SQLite) dialect.

use super::{escape_identifier, AlterTableBuilder, DatabaseBuilder, Dialect, TableBuilder};
use crate::error::{Result, SqlError};
use crate::schema::{Field, FieldType, Index, Schema};

/// SQLite dialect.
///
/// SQLite's ALTER TABLE support is narrow: columns can be added and renamed
/// and tables renamed, but column removal, type changes, and index
/// manipulation are rejected with [`SqlError::NotSupported`] so the
/// migration engine can report the gap instead of silently no-op-ing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn create_table_builder(&self) -> Box<dyn TableBuilder> {
        Box::new(SqliteTableBuilder)
    }

    fn alter_table_builder(&self) -> Box<dyn AlterTableBuilder> {
        Box::new(SqliteAlterTableBuilder)
    }

    fn create_database_builder(&self) -> Box<dyn DatabaseBuilder> {
        Box::new(SqliteDatabaseBuilder)
    }
}

fn data_type(field: &Field) -> &'static str {
    // SQLite has dynamic typing with type affinity
    match &field.field_type {
        FieldType::PrimaryKey
        | FieldType::Integer
        | FieldType::Boolean
        | FieldType::Reference(_) => "INTEGER",
        FieldType::String(_) | FieldType::Text | FieldType::DateTime => "TEXT",
    }
}

fn column_definition(field: &Field) -> String {
    if field.is_primary_key() {
        // Primary key is expressed inline, there is no table-level fragment
        return format!(
            "{} INTEGER PRIMARY KEY AUTOINCREMENT",
            escape_identifier(&field.name)
        );
    }
    let mut sql = format!("{} {}", escape_identifier(&field.name), data_type(field));
    if !field.nullable {
        sql.push_str(" NOT NULL");
    }
    if let Some(default) = &field.default {
        sql.push_str(" DEFAULT ");
        sql.push_str(&default.to_sql());
    }
    sql
}

struct SqliteTableBuilder;

impl TableBuilder for SqliteTableBuilder {
    fn column(&self, field: &Field) -> Result<String> {
        Ok(column_definition(field))
    }

    fn primary_key(&self, field: &Field) -> Result<Option<String>> {
        if !field.is_primary_key() {
            return Err(SqlError::precondition(format!(
                "field '{}' is not a primary key",
                field.name
            )));
        }
        Ok(None)
    }

    fn foreign_key(&self, field: &Field) -> Result<String> {
        let Some(target) = field.referenced_table() else {
            return Err(SqlError::precondition(format!(
                "field '{}' is not a table reference",
                field.name
            )));
        };
        Ok(format!(
            "FOREIGN KEY ({}) REFERENCES {} (`id`)",
            escape_identifier(&field.name),
            escape_identifier(target)
        ))
    }

    fn index(&self, index: &Index) -> Result<Option<String>> {
        if !index.unique {
            // Non-unique indexes are silently skipped in CREATE TABLE
            // context. Inherited behavior, possibly a gap: a separate
            // CREATE INDEX statement would cover it, but none is emitted.
            return Ok(None);
        }
        let columns = index
            .fields
            .iter()
            .map(|f| escape_identifier(f))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(Some(format!(
            "CONSTRAINT {} UNIQUE ({columns})",
            escape_identifier(&index.name)
        )))
    }
}

struct SqliteAlterTableBuilder;

impl AlterTableBuilder for SqliteAlterTableBuilder {
    fn add_field(&self, table: &str, field: &Field) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ADD COLUMN {}",
            escape_identifier(table),
            column_definition(field)
        ))
    }

    fn remove_field(&self, _table: &str, _field: &Field) -> Result<String> {
        Err(SqlError::not_supported("sqlite", "remove_field"))
    }

    fn change_field(&self, _table: &str, _old: &Field, _new: &Field) -> Result<String> {
        Err(SqlError::not_supported("sqlite", "change_field"))
    }

    fn rename_field(&self, table: &str, old_name: &str, new: &Field) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} RENAME COLUMN {} TO {}",
            escape_identifier(table),
            escape_identifier(old_name),
            escape_identifier(&new.name)
        ))
    }

    fn add_index(&self, _table: &str, _index: &Index) -> Result<String> {
        Err(SqlError::not_supported("sqlite", "add_index"))
    }

    fn remove_index(&self, _table: &str, _index: &Index) -> Result<String> {
        Err(SqlError::not_supported("sqlite", "remove_index"))
    }

    fn rename_index(&self, _table: &str, _old_name: &str, _new_name: &str) -> Result<String> {
        Err(SqlError::not_supported("sqlite", "rename_index"))
    }
}

struct SqliteDatabaseBuilder;

impl DatabaseBuilder for SqliteDatabaseBuilder {
    fn create_options(&self, _schema: &Schema) -> Result<String> {
        Err(SqlError::not_supported("sqlite", "create_options"))
    }

    fn create_database(&self, _schema: &Schema) -> Result<String> {
        Err(SqlError::not_supported("sqlite", "create_database"))
    }
}
