//! Entity definitions.

use super::constraint::{ForeignKeyDef, IndexDef, KeyDef};
use super::property::PropertyDef;
use super::types::TableName;
use serde::{Deserialize, Serialize};

/// A declared entity and the table it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDef {
    /// Entity name (unique within the model).
    pub name: String,
    /// Target table.
    pub table: TableName,
    /// Property definitions, in comparison order.
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
    /// Primary key, if the entity has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<KeyDef>,
    /// Index definitions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<IndexDef>,
    /// Foreign key definitions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKeyDef>,
}

impl EntityDef {
    /// Create a new entity mapped to `table`.
    pub fn new(name: impl Into<String>, table: TableName) -> Self {
        Self {
            name: name.into(),
            table,
            properties: Vec::new(),
            primary_key: None,
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Add a property to the entity.
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    /// Add multiple properties.
    pub fn with_properties(mut self, properties: impl IntoIterator<Item = PropertyDef>) -> Self {
        self.properties.extend(properties);
        self
    }

    /// Set the primary key.
    pub fn with_primary_key(mut self, key: KeyDef) -> Self {
        self.primary_key = Some(key);
        self
    }

    /// Add an index.
    pub fn with_index(mut self, index: IndexDef) -> Self {
        self.indexes.push(index);
        self
    }

    /// Add a foreign key.
    pub fn with_foreign_key(mut self, foreign_key: ForeignKeyDef) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    /// Get a property by name.
    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Check if a property is part of the primary key.
    pub fn is_key_property(&self, name: &str) -> bool {
        self.primary_key
            .as_ref()
            .is_some_and(|key| key.contains(name))
    }

    /// Resolve property names to their column names.
    ///
    /// Returns `None` if any property is unknown.
    pub fn column_names(&self, properties: &[String]) -> Option<Vec<String>> {
        properties
            .iter()
            .map(|name| self.get_property(name).map(|p| p.column_name.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ScalarType;

    fn sample_entity() -> EntityDef {
        EntityDef::new("MyEntity", TableName::new("MyEntities"))
            .with_property(PropertyDef::new("MyEntityId", ScalarType::Int32))
            .with_property(PropertyDef::new("MyInt", ScalarType::Int32).with_column_name("Other"))
            .with_property(PropertyDef::optional("MyString", ScalarType::String))
            .with_primary_key(KeyDef::new(["MyEntityId"]))
    }

    #[test]
    fn test_entity_builder() {
        let entity = sample_entity();

        assert_eq!(entity.name, "MyEntity");
        assert_eq!(entity.table.to_string(), "MyEntities");
        assert_eq!(entity.properties.len(), 3);
        assert!(entity.primary_key.is_some());
    }

    #[test]
    fn test_get_property() {
        let entity = sample_entity();

        assert!(entity.get_property("MyInt").is_some());
        assert!(entity.get_property("Nonexistent").is_none());
        assert!(entity.is_key_property("MyEntityId"));
        assert!(!entity.is_key_property("MyInt"));
    }

    #[test]
    fn test_column_names() {
        let entity = sample_entity();

        assert_eq!(
            entity.column_names(&["MyEntityId".into(), "MyInt".into()]),
            Some(vec!["MyEntityId".to_string(), "Other".to_string()])
        );
        assert_eq!(entity.column_names(&["Missing".into()]), None);
    }
}
