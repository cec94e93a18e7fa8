//! Discovered model - the schema as introspected from a live database.

use super::table::TableDef;
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// The actual schema of a database.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatabaseModel {
    /// Schema that unqualified tables belong to, as reported by the database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_schema: Option<String>,
    /// Tables, in discovery order.
    #[serde(default)]
    pub tables: Vec<TableDef>,
}

impl DatabaseModel {
    /// Create an empty database model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default schema.
    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = Some(schema.into());
        self
    }

    /// Add a table.
    pub fn with_table(mut self, table: TableDef) -> Self {
        self.tables.push(table);
        self
    }

    /// Serialize the model to JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize a model from JSON.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Deserialization(e.to_string()))
    }
}
