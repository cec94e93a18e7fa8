//! Key, index and foreign key definitions for entities.

use super::types::{ReferentialAction, TableName};
use serde::{Deserialize, Serialize};

/// A declared primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDef {
    /// Constraint name; `None` uses the provider's conventional name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Key properties, in key order.
    pub properties: Vec<String>,
}

impl KeyDef {
    /// Create a key over the given properties.
    pub fn new(properties: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: None,
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }

    /// Set an explicit constraint name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Check if a property is part of this key.
    pub fn contains(&self, property: &str) -> bool {
        self.properties.iter().any(|p| p == property)
    }
}

/// A declared index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDef {
    /// Index name.
    pub name: String,
    /// Indexed properties, in index order.
    pub properties: Vec<String>,
    /// Whether the index enforces uniqueness.
    #[serde(default)]
    pub unique: bool,
}

impl IndexDef {
    /// Create a non-unique index.
    pub fn new(
        name: impl Into<String>,
        properties: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            properties: properties.into_iter().map(Into::into).collect(),
            unique: false,
        }
    }

    /// Create a unique index.
    pub fn unique(
        name: impl Into<String>,
        properties: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            unique: true,
            ..Self::new(name, properties)
        }
    }
}

/// A declared foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyDef {
    /// Constraint name.
    pub name: String,
    /// Dependent properties, in key order.
    pub properties: Vec<String>,
    /// Table holding the principal key.
    pub principal_table: TableName,
    /// Delete behavior.
    #[serde(default)]
    pub on_delete: ReferentialAction,
}

impl ForeignKeyDef {
    /// Create a foreign key with the default delete behavior.
    pub fn new(
        name: impl Into<String>,
        properties: impl IntoIterator<Item = impl Into<String>>,
        principal_table: TableName,
    ) -> Self {
        Self {
            name: name.into(),
            properties: properties.into_iter().map(Into::into).collect(),
            principal_table,
            on_delete: ReferentialAction::default(),
        }
    }

    /// Set the delete behavior.
    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = action;
        self
    }
}
