//! Declarative schema model.
//!
//! These types describe the structure the application expects: tables,
//! fields, indexes, and dialect-level options. They are pure data compared
//! by structural equality; the migration planner diffs two of them and the
//! dialect drivers render them to DDL.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SqlError};

/// Declared type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Auto-incrementing integer primary key.
    PrimaryKey,
    /// Integer.
    Integer,
    /// Variable-length string with a maximum length.
    String(u32),
    /// Unbounded text.
    Text,
    /// Date and time.
    DateTime,
    /// Boolean.
    Boolean,
    /// Reference to another table's primary key.
    Reference(String),
}

/// Default value for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// NULL default.
    Null,
    /// Boolean default.
    Bool(bool),
    /// Integer default.
    Integer(i64),
    /// String default.
    String(String),
    /// SQL expression (e.g., "CURRENT_TIMESTAMP").
    Expression(String),
}

impl DefaultValue {
    /// Returns the SQL representation of this default value.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::String(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Expression(expr) => expr.clone(),
        }
    }
}

/// A single table field.
///
/// Immutable once constructed; its identity within a table is its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Declared type.
    pub field_type: FieldType,
    /// Whether the field allows NULL values.
    pub nullable: bool,
    /// Default value, if any.
    pub default: Option<DefaultValue>,
}

impl Field {
    /// Creates a new field of the given type.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            nullable: true,
            default: None,
        }
    }

    /// Creates an auto-incrementing integer primary key field.
    #[must_use]
    pub fn primary_key(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::PrimaryKey).not_null()
    }

    /// Creates an integer field.
    #[must_use]
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    /// Creates a string field with a maximum length.
    #[must_use]
    pub fn string(name: impl Into<String>, length: u32) -> Self {
        Self::new(name, FieldType::String(length))
    }

    /// Creates a text field.
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }

    /// Creates a datetime field.
    #[must_use]
    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::DateTime)
    }

    /// Creates a boolean field.
    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    /// Creates a field referencing another table's primary key.
    #[must_use]
    pub fn reference(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self::new(name, FieldType::Reference(table.into()))
    }

    /// Marks the field NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Returns whether this field is the table's primary key.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        matches!(self.field_type, FieldType::PrimaryKey)
    }

    /// Returns the referenced table name, if this is a reference field.
    #[must_use]
    pub fn referenced_table(&self) -> Option<&str> {
        match &self.field_type {
            FieldType::Reference(table) => Some(table),
            _ => None,
        }
    }
}

/// An index over one or more fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Index {
    /// Index name, unique within its table.
    pub name: String,
    /// Ordered field names covered by the index.
    pub fields: Vec<String>,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
}

impl Index {
    /// Creates a non-unique index.
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            name: name.into(),
            fields,
            unique: false,
        }
    }

    /// Marks the index unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// Dialect-level options (charset, collation) for a table or schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectOptions {
    /// Character set.
    pub charset: Option<String>,
    /// Collation.
    pub collation: Option<String>,
}

impl DialectOptions {
    /// Creates empty options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            charset: None,
            collation: None,
        }
    }

    /// Sets the character set.
    #[must_use]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Sets the collation.
    #[must_use]
    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }
}

/// A declared table: ordered fields (primary key first by convention),
/// ordered indexes, and dialect options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Field definitions, in declaration order.
    pub fields: Vec<Field>,
    /// Index definitions, in declaration order.
    pub indexes: Vec<Index>,
    /// Dialect-level options.
    pub options: DialectOptions,
}

impl Table {
    /// Creates a new empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            indexes: Vec::new(),
            options: DialectOptions::new(),
        }
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds an index.
    #[must_use]
    pub fn index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    /// Sets the dialect options.
    #[must_use]
    pub fn options(mut self, options: DialectOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the primary-key field, if declared.
    #[must_use]
    pub fn primary_key_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.is_primary_key())
    }

    /// Gets a field by name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Gets an index by name.
    #[must_use]
    pub fn get_index(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// Validates field and index name uniqueness.
    pub fn validate(&self) -> Result<()> {
        for (pos, field) in self.fields.iter().enumerate() {
            if self.fields[..pos].iter().any(|f| f.name == field.name) {
                return Err(SqlError::precondition(format!(
                    "duplicate field '{}' in table '{}'",
                    field.name, self.name
                )));
            }
        }
        for (pos, index) in self.indexes.iter().enumerate() {
            if self.indexes[..pos].iter().any(|i| i.name == index.name) {
                return Err(SqlError::precondition(format!(
                    "duplicate index '{}' in table '{}'",
                    index.name, self.name
                )));
            }
        }
        Ok(())
    }
}

/// A declared schema: a named set of tables plus dialect options.
///
/// Compared by structural equality; two schemas with identical field and
/// index sets are interchangeable for diffing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema (database) name.
    pub name: String,
    /// All declared tables.
    pub tables: Vec<Table>,
    /// Dialect-level options applied at the database level.
    pub options: DialectOptions,
}

impl Schema {
    /// Creates a new empty schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
            options: DialectOptions::new(),
        }
    }

    /// Adds a table.
    #[must_use]
    pub fn table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Sets the dialect options.
    #[must_use]
    pub fn options(mut self, options: DialectOptions) -> Self {
        self.options = options;
        self
    }

    /// Gets a table by name.
    #[must_use]
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Returns table names in declaration order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    /// Validates table name uniqueness and each table's own invariants.
    pub fn validate(&self) -> Result<()> {
        for (pos, table) in self.tables.iter().enumerate() {
            if self.tables[..pos].iter().any(|t| t.name == table.name) {
                return Err(SqlError::precondition(format!(
                    "duplicate table '{}' in schema '{}'",
                    table.name, self.name
                )));
            }
            table.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projects_table() -> Table {
        Table::new("projects")
            .field(Field::primary_key("id"))
            .field(Field::string("name", 255).not_null())
            .field(Field::reference("owner_id", "users"))
            .index(Index::new("idx_name", vec!["name".to_string()]).unique())
    }

    #[test]
    fn test_field_builders() {
        let field = Field::string("name", 255).not_null();
        assert_eq!(field.field_type, FieldType::String(255));
        assert!(!field.nullable);

        let pk = Field::primary_key("id");
        assert!(pk.is_primary_key());
        assert!(!pk.nullable);

        let fk = Field::reference("owner_id", "users");
        assert_eq!(fk.referenced_table(), Some("users"));
    }

    #[test]
    fn test_table_lookup() {
        let table = projects_table();
        assert_eq!(table.primary_key_field().map(|f| f.name.as_str()), Some("id"));
        assert!(table.get_field("name").is_some());
        assert!(table.get_field("missing").is_none());
        assert!(table.get_index("idx_name").is_some());
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(projects_table(), projects_table());

        let changed = projects_table().field(Field::boolean("archived"));
        assert_ne!(projects_table(), changed);
    }

    #[test]
    fn test_schema_validate_duplicate_table() {
        let schema = Schema::new("app")
            .table(Table::new("projects"))
            .table(Table::new("projects"));
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_table_validate_duplicate_field() {
        let table = Table::new("projects")
            .field(Field::integer("a"))
            .field(Field::integer("a"));
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_default_value_to_sql() {
        assert_eq!(DefaultValue::Null.to_sql(), "NULL");
        assert_eq!(DefaultValue::Bool(true).to_sql(), "1");
        assert_eq!(DefaultValue::Integer(42).to_sql(), "42");
        assert_eq!(DefaultValue::String("it's".to_string()).to_sql(), "'it''s'");
        assert_eq!(
            DefaultValue::Expression("CURRENT_TIMESTAMP".to_string()).to_sql(),
            "CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn test_schema_serde_round_trip() {
        let schema = Schema::new("app").table(projects_table());
        let json = serde_json::to_string(&schema).unwrap();
        let back: Schema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, back);
    }
}
