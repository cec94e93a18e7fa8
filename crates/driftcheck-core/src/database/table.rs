//! Discovered tables, columns and constraints.

use crate::catalog::{ReferentialAction, TableName};
use serde::{Deserialize, Serialize};

/// A column as introspected from the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Raw store type name as reported by the database (e.g. `nvarchar(max)`).
    pub store_type: String,
    /// Whether the column accepts NULL.
    #[serde(default)]
    pub nullable: bool,
    /// Whether the column is an identity / auto-increment column.
    #[serde(default)]
    pub is_identity: bool,
    /// Default value SQL, as reported by the database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value_sql: Option<String>,
    /// Computed column SQL, as reported by the database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_column_sql: Option<String>,
}

impl ColumnDef {
    /// Create a non-nullable column.
    pub fn new(name: impl Into<String>, store_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            store_type: store_type.into(),
            nullable: false,
            is_identity: false,
            default_value_sql: None,
            computed_column_sql: None,
        }
    }

    /// Mark the column nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the column as an identity column.
    pub fn identity(mut self) -> Self {
        self.is_identity = true;
        self
    }

    /// Set the default value SQL.
    pub fn with_default_sql(mut self, sql: impl Into<String>) -> Self {
        self.default_value_sql = Some(sql.into());
        self
    }

    /// Set the computed column SQL.
    pub fn with_computed_sql(mut self, sql: impl Into<String>) -> Self {
        self.computed_column_sql = Some(sql.into());
        self
    }
}

/// A discovered primary key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKeyConstraint {
    /// Constraint name.
    pub name: String,
    /// Key columns, in ordinal order.
    pub columns: Vec<String>,
}

impl PrimaryKeyConstraint {
    /// Create a primary key constraint.
    pub fn new(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

/// A discovered index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConstraint {
    /// Index name.
    pub name: String,
    /// Indexed columns, in ordinal order.
    pub columns: Vec<String>,
    /// Whether the index enforces uniqueness.
    #[serde(default)]
    pub unique: bool,
}

impl IndexConstraint {
    /// Create an index.
    pub fn new(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
        unique: bool,
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            unique,
        }
    }
}

/// A discovered foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyConstraint {
    /// Constraint name.
    pub name: String,
    /// Dependent columns, in ordinal order.
    pub columns: Vec<String>,
    /// Table holding the principal key.
    pub principal_table: TableName,
    /// Delete behavior.
    #[serde(default)]
    pub on_delete: ReferentialAction,
}

impl ForeignKeyConstraint {
    /// Create a foreign key constraint.
    pub fn new(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
        principal_table: TableName,
        on_delete: ReferentialAction,
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            principal_table,
            on_delete,
        }
    }
}

/// A table as introspected from the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    /// Schema name; `None` for databases without schemas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
    /// Columns, in ordinal order.
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    /// Primary key constraint, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKeyConstraint>,
    /// Indexes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<IndexConstraint>,
    /// Foreign key constraints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKeyConstraint>,
}

impl TableDef {
    /// Create a table with no schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            columns: Vec::new(),
            primary_key: None,
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Set the schema.
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Add a column.
    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Add multiple columns.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = ColumnDef>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Set the primary key.
    pub fn with_primary_key(mut self, key: PrimaryKeyConstraint) -> Self {
        self.primary_key = Some(key);
        self
    }

    /// Add an index.
    pub fn with_index(mut self, index: IndexConstraint) -> Self {
        self.indexes.push(index);
        self
    }

    /// Add a foreign key.
    pub fn with_foreign_key(mut self, foreign_key: ForeignKeyConstraint) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    /// The table's identifier.
    pub fn table_name(&self) -> TableName {
        TableName {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_builder() {
        let column = ColumnDef::new("MyEntityId", "int").identity();
        assert!(column.is_identity);
        assert!(!column.nullable);

        let column = ColumnDef::new("MyString", "nvarchar(max)").nullable();
        assert!(column.nullable);
        assert!(column.default_value_sql.is_none());
    }

    #[test]
    fn test_table_builder() {
        let table = TableDef::new("MyEntities")
            .in_schema("dbo")
            .with_column(ColumnDef::new("MyEntityId", "int").identity())
            .with_column(ColumnDef::new("MyInt", "int"))
            .with_primary_key(PrimaryKeyConstraint::new("PK_MyEntities", ["MyEntityId"]));

        assert_eq!(table.table_name().to_string(), "dbo.MyEntities");
        assert_eq!(table.columns.len(), 2);
        assert_eq!(
            table.primary_key.as_ref().map(|pk| pk.columns.clone()),
            Some(vec!["MyEntityId".to_string()])
        );
    }
}
