//! Property definitions for entities.

use super::types::{ScalarType, ValueGenerated};
use serde::{Deserialize, Serialize};

/// A declared property and the column it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    /// Property name.
    pub name: String,
    /// Name of the column this property is stored in.
    pub column_name: String,
    /// Scalar type of the property.
    pub scalar_type: ScalarType,
    /// Explicit store type (e.g. `varchar(max)`), overriding the provider's mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
    /// Whether the column accepts NULL.
    #[serde(default)]
    pub nullable: bool,
    /// When the database generates the value.
    #[serde(default)]
    pub value_generated: ValueGenerated,
    /// Default value SQL expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value_sql: Option<String>,
    /// Computed column SQL expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_column_sql: Option<String>,
}

impl PropertyDef {
    /// Create a new non-nullable property stored in a column of the same name.
    pub fn new(name: impl Into<String>, scalar_type: ScalarType) -> Self {
        let name = name.into();
        Self {
            column_name: name.clone(),
            name,
            scalar_type,
            column_type: None,
            nullable: false,
            value_generated: ValueGenerated::Never,
            default_value_sql: None,
            computed_column_sql: None,
        }
    }

    /// Create a nullable property.
    pub fn optional(name: impl Into<String>, scalar_type: ScalarType) -> Self {
        Self {
            nullable: true,
            ..Self::new(name, scalar_type)
        }
    }

    /// Map the property to a differently named column.
    pub fn with_column_name(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = column_name.into();
        self
    }

    /// Override the store type.
    pub fn with_column_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = Some(column_type.into());
        self
    }

    /// Set nullability.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set the value generation policy.
    pub fn with_value_generated(mut self, value_generated: ValueGenerated) -> Self {
        self.value_generated = value_generated;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_def_builder() {
        let property = PropertyDef::new("MyInt", ScalarType::Int32)
            .with_default_sql("123")
            .with_value_generated(ValueGenerated::OnAdd);

        assert_eq!(property.name, "MyInt");
        assert_eq!(property.column_name, "MyInt");
        assert!(!property.nullable);
        assert_eq!(property.default_value_sql.as_deref(), Some("123"));
        assert_eq!(property.value_generated, ValueGenerated::OnAdd);
    }

    #[test]
    fn test_optional_property() {
        let property = PropertyDef::optional("MyString", ScalarType::String);

        assert!(property.nullable);
        assert!(property.default_value_sql.is_none());
        assert!(property.computed_column_sql.is_none());
    }

    #[test]
    fn test_column_overrides() {
        let property = PropertyDef::new("MyInt", ScalarType::Int32)
            .with_column_name("OtherColName")
            .with_column_type("bigint");

        assert_eq!(property.name, "MyInt");
        assert_eq!(property.column_name, "OtherColName");
        assert_eq!(property.column_type.as_deref(), Some("bigint"));
    }

    #[test]
    fn test_computed_property() {
        let property = PropertyDef::new("MyDateTime", ScalarType::DateTime)
            .with_computed_sql("getutcdate()");

        assert_eq!(property.computed_column_sql.as_deref(), Some("getutcdate()"));
    }
}
