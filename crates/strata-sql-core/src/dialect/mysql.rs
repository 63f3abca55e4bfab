//! MySQL-family dialect.

use super::{
    escape_identifier, AlterTableBuilder, DatabaseBuilder, Dialect, DialectOptions, TableBuilder,
};
use crate::error::{Result, SqlError};
use crate::schema::{Field, FieldType, Index, Schema};

/// MySQL/MariaDB dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlDialect;

impl MysqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn create_table_builder(&self) -> Box<dyn TableBuilder> {
        Box::new(MysqlTableBuilder)
    }

    fn alter_table_builder(&self) -> Box<dyn AlterTableBuilder> {
        Box::new(MysqlAlterTableBuilder)
    }

    fn create_database_builder(&self) -> Box<dyn DatabaseBuilder> {
        Box::new(MysqlDatabaseBuilder)
    }
}

fn data_type(field: &Field) -> String {
    match &field.field_type {
        FieldType::PrimaryKey | FieldType::Integer | FieldType::Reference(_) => "INT".to_string(),
        FieldType::String(length) => format!("VARCHAR({length})"),
        FieldType::Text => "TEXT".to_string(),
        FieldType::DateTime => "DATETIME".to_string(),
        FieldType::Boolean => "TINYINT(1)".to_string(),
    }
}

fn column_definition(field: &Field) -> String {
    if field.is_primary_key() {
        return format!(
            "{} INT NOT NULL AUTO_INCREMENT",
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

fn index_columns(index: &Index) -> String {
    index
        .fields
        .iter()
        .map(|f| escape_identifier(f))
        .collect::<Vec<_>>()
        .join(", ")
}

struct MysqlTableBuilder;

impl TableBuilder for MysqlTableBuilder {
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
        Ok(Some(format!(
            "PRIMARY KEY ({})",
            escape_identifier(&field.name)
        )))
    }

    fn foreign_key(&self, field: &Field) -> Result<String> {
        let Some(target) = field.referenced_table() else {
            return Err(SqlError::precondition(format!(
                "field '{}' is not a table reference",
                field.name
            )));
        };
        Ok(format!(
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} (`id`)",
            escape_identifier(&format!("fk_{}", field.name)),
            escape_identifier(&field.name),
            escape_identifier(target)
        ))
    }

    fn index(&self, index: &Index) -> Result<Option<String>> {
        let keyword = if index.unique { "UNIQUE KEY" } else { "KEY" };
        Ok(Some(format!(
            "{keyword} {} ({})",
            escape_identifier(&index.name),
            index_columns(index)
        )))
    }

    fn table_options(&self, options: &DialectOptions) -> String {
        let mut sql = String::from("ENGINE=InnoDB");
        if let Some(charset) = &options.charset {
            sql.push_str(&format!(" DEFAULT CHARSET={charset}"));
        }
        if let Some(collation) = &options.collation {
            sql.push_str(&format!(" COLLATE={collation}"));
        }
        sql
    }
}

struct MysqlAlterTableBuilder;

impl AlterTableBuilder for MysqlAlterTableBuilder {
    fn add_field(&self, table: &str, field: &Field) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ADD COLUMN {}",
            escape_identifier(table),
            column_definition(field)
        ))
    }

    fn remove_field(&self, table: &str, field: &Field) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} DROP COLUMN {}",
            escape_identifier(table),
            escape_identifier(&field.name)
        ))
    }

    fn change_field(&self, table: &str, old: &Field, new: &Field) -> Result<String> {
        if old.name != new.name {
            return Err(SqlError::precondition(format!(
                "change_field requires matching names, got '{}' and '{}'",
                old.name, new.name
            )));
        }
        Ok(format!(
            "ALTER TABLE {} MODIFY COLUMN {}",
            escape_identifier(table),
            column_definition(new)
        ))
    }

    fn rename_field(&self, table: &str, old_name: &str, new: &Field) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} CHANGE COLUMN {} {}",
            escape_identifier(table),
            escape_identifier(old_name),
            column_definition(new)
        ))
    }

    fn add_index(&self, table: &str, index: &Index) -> Result<String> {
        let keyword = if index.unique {
            "ADD UNIQUE INDEX"
        } else {
            "ADD INDEX"
        };
        Ok(format!(
            "ALTER TABLE {} {keyword} {} ({})",
            escape_identifier(table),
            escape_identifier(&index.name),
            index_columns(index)
        ))
    }

    fn remove_index(&self, table: &str, index: &Index) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} DROP INDEX {}",
            escape_identifier(table),
            escape_identifier(&index.name)
        ))
    }

    fn rename_index(&self, table: &str, old_name: &str, new_name: &str) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} RENAME INDEX {} TO {}",
            escape_identifier(table),
            escape_identifier(old_name),
            escape_identifier(new_name)
        ))
    }
}

struct MysqlDatabaseBuilder;

impl DatabaseBuilder for MysqlDatabaseBuilder {
    fn create_options(&self, schema: &Schema) -> Result<String> {
        let charset = schema.options.charset.as_deref().unwrap_or("utf8mb4");
        let mut sql = format!("DEFAULT CHARSET={charset}");
        if let Some(collation) = &schema.options.collation {
            sql.push_str(&format!(" COLLATE={collation}"));
        }
        Ok(sql)
    }

    fn create_database(&self, schema: &Schema) -> Result<String> {
        Ok(format!(
            "CREATE DATABASE IF NOT EXISTS {} {}",
            escape_identifier(&schema.name),
            self.create_options(schema)?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DefaultValue, Table};

    fn builder() -> Box<dyn TableBuilder> {
        MysqlDialect::new().create_table_builder()
    }

    fn alter() -> Box<dyn AlterTableBuilder> {
        MysqlDialect::new().alter_table_builder()
    }

    #[test]
    fn test_column_definitions() {
        let b = builder();
        assert_eq!(
            b.column(&Field::primary_key("id")).unwrap(),
            "`id` INT NOT NULL AUTO_INCREMENT"
        );
        assert_eq!(
            b.column(&Field::string("name", 50).not_null()).unwrap(),
            "`name` VARCHAR(50) NOT NULL"
        );
        assert_eq!(
            b.column(
                &Field::boolean("is_active").default_value(DefaultValue::Bool(true))
            )
            .unwrap(),
            "`is_active` TINYINT(1) DEFAULT 1"
        );
        assert_eq!(
            b.column(&Field::datetime("created_at")).unwrap(),
            "`created_at` DATETIME"
        );
    }

    #[test]
    fn test_primary_key_fragment() {
        let b = builder();
        assert_eq!(
            b.primary_key(&Field::primary_key("id")).unwrap(),
            Some("PRIMARY KEY (`id`)".to_string())
        );
        assert!(matches!(
            b.primary_key(&Field::integer("count")),
            Err(SqlError::Precondition(_))
        ));
    }

    #[test]
    fn test_foreign_key_fragment() {
        let b = builder();
        assert_eq!(
            b.foreign_key(&Field::reference("owner_id", "users")).unwrap(),
            "CONSTRAINT `fk_owner_id` FOREIGN KEY (`owner_id`) REFERENCES `users` (`id`)"
        );
        assert!(matches!(
            b.foreign_key(&Field::integer("owner_id")),
            Err(SqlError::Precondition(_))
        ));
    }

    #[test]
    fn test_create_table() {
        let table = Table::new("projects")
            .field(Field::primary_key("id"))
            .field(Field::string("name", 255).not_null())
            .field(Field::reference("owner_id", "users"))
            .index(Index::new("idx_name", vec!["name".to_string()]).unique())
            .options(DialectOptions::new().charset("utf8mb4"));

        let sql = builder().create_table(&table).unwrap();
        assert!(sql.starts_with("CREATE TABLE `projects` (\n"));
        assert!(sql.contains("    `id` INT NOT NULL AUTO_INCREMENT,\n"));
        assert!(sql.contains("    PRIMARY KEY (`id`)"));
        assert!(sql.contains(
            "    CONSTRAINT `fk_owner_id` FOREIGN KEY (`owner_id`) REFERENCES `users` (`id`)"
        ));
        assert!(sql.contains("    UNIQUE KEY `idx_name` (`name`)"));
        assert!(sql.ends_with(") ENGINE=InnoDB DEFAULT CHARSET=utf8mb4"));
    }

    #[test]
    fn test_alter_statements() {
        let a = alter();
        assert_eq!(
            a.add_field("projects", &Field::boolean("archived").not_null())
                .unwrap(),
            "ALTER TABLE `projects` ADD COLUMN `archived` TINYINT(1) NOT NULL"
        );
        assert_eq!(
            a.remove_field("projects", &Field::boolean("archived")).unwrap(),
            "ALTER TABLE `projects` DROP COLUMN `archived`"
        );
        assert_eq!(
            a.change_field(
                "projects",
                &Field::string("name", 100),
                &Field::string("name", 255).not_null()
            )
            .unwrap(),
            "ALTER TABLE `projects` MODIFY COLUMN `name` VARCHAR(255) NOT NULL"
        );
        assert_eq!(
            a.rename_field("projects", "name", &Field::string("title", 255))
                .unwrap(),
            "ALTER TABLE `projects` CHANGE COLUMN `name` `title` VARCHAR(255)"
        );
        assert_eq!(
            a.add_index(
                "projects",
                &Index::new("idx_owner", vec!["owner_id".to_string()])
            )
            .unwrap(),
            "ALTER TABLE `projects` ADD INDEX `idx_owner` (`owner_id`)"
        );
        assert_eq!(
            a.remove_index(
                "projects",
                &Index::new("idx_owner", vec!["owner_id".to_string()])
            )
            .unwrap(),
            "ALTER TABLE `projects` DROP INDEX `idx_owner`"
        );
        assert_eq!(
            a.rename_index("projects", "idx_owner", "idx_owner_id").unwrap(),
            "ALTER TABLE `projects` RENAME INDEX `idx_owner` TO `idx_owner_id`"
        );
        assert_eq!(
            a.rename_table("projects", "workspaces").unwrap(),
            "ALTER TABLE `projects` RENAME TO `workspaces`"
        );
    }

    #[test]
    fn test_change_field_name_mismatch() {
        let a = alter();
        let result = a.change_field(
            "projects",
            &Field::string("name", 100),
            &Field::string("title", 255),
        );
        assert!(matches!(result, Err(SqlError::Precondition(_))));
    }

    #[test]
    fn test_create_database() {
        let schema = Schema::new("app")
            .options(DialectOptions::new().charset("utf8mb4").collation("utf8mb4_unicode_ci"));
        let b = MysqlDialect::new().create_database_builder();
        assert_eq!(
            b.create_options(&schema).unwrap(),
            "DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci"
        );
        assert_eq!(
            b.create_database(&schema).unwrap(),
            "CREATE DATABASE IF NOT EXISTS `app` DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci"
        );
    }
}
