//! Declared model - the schema as expressed by mapping code.

use super::entity::EntityDef;
use crate::error::{Error, ModelError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The intended schema: entities in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeclaredModel {
    /// Model name (typically the mapping context's name).
    pub name: String,
    /// Entity definitions, in declaration order.
    #[serde(default)]
    pub entities: Vec<EntityDef>,
}

impl DeclaredModel {
    /// Create an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
        }
    }

    /// Add an entity to the model.
    pub fn with_entity(mut self, entity: EntityDef) -> Self {
        self.entities.push(entity);
        self
    }

    /// List all entity names.
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.name.as_str()).collect()
    }

    /// Check the model for contradictions the comparison cannot report as a diff.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut entity_names = HashSet::new();
        for entity in &self.entities {
            if !entity_names.insert(entity.name.as_str()) {
                return Err(ModelError::DuplicateEntity {
                    entity: entity.name.clone(),
                });
            }

            let mut property_names = HashSet::new();
            for property in &entity.properties {
                if !property_names.insert(property.name.as_str()) {
                    return Err(ModelError::DuplicateProperty {
                        entity: entity.name.clone(),
                        property: property.name.clone(),
                    });
                }
            }

            if let Some(key) = &entity.primary_key {
                check_references(entity, "primary key".to_string(), &key.properties)?;
            }
            for index in &entity.indexes {
                check_references(entity, format!("index '{}'", index.name), &index.properties)?;
            }
            for fk in &entity.foreign_keys {
                check_references(entity, format!("foreign key '{}'", fk.name), &fk.properties)?;
            }
        }
        Ok(())
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

fn check_references(
    entity: &EntityDef,
    constraint: String,
    properties: &[String],
) -> Result<(), ModelError> {
    if properties.is_empty() {
        return Err(ModelError::EmptyConstraint {
            entity: entity.name.clone(),
            constraint,
        });
    }
    if let Some(missing) = properties.iter().find(|p| entity.get_property(p).is_none()) {
        return Err(ModelError::UnknownProperty {
            entity: entity.name.clone(),
            constraint,
            property: missing.clone(),
        });
    }
    let mut seen = HashSet::new();
    match properties.iter().find(|p| !seen.insert(p.as_str())) {
        Some(repeated) => Err(ModelError::DuplicateConstraintProperty {
            entity: entity.name.clone(),
            constraint,
            property: repeated.clone(),
        }),
        None => Ok(()),
    }
}
