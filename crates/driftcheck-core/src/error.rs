//! Core error types.
//!
//! Structural differences between a model and a database are never errors;
//! they are recorded in the diff log. These types cover inputs the engine
//! refuses to compare.

use thiserror::Error;

/// Core errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The declared model is malformed or contradictory.
    #[error("invalid model: {0}")]
    Model(#[from] ModelError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Precondition violations in a declared model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Two entities share a name.
    #[error("duplicate entity '{entity}'")]
    DuplicateEntity {
        /// The repeated entity name.
        entity: String,
    },

    /// Two properties of one entity share a name.
    #[error("duplicate property '{property}' on entity '{entity}'")]
    DuplicateProperty {
        /// The owning entity.
        entity: String,
        /// The repeated property name.
        property: String,
    },

    /// A key, index or foreign key lists no properties.
    #[error("{constraint} on entity '{entity}' has no properties")]
    EmptyConstraint {
        /// The owning entity.
        entity: String,
        /// Which constraint, e.g. `primary key` or `index 'IX_Users_Email'`.
        constraint: String,
    },

    /// A key, index or foreign key references a property the entity lacks.
    #[error("{constraint} on entity '{entity}' references unknown property '{property}'")]
    UnknownProperty {
        /// The owning entity.
        entity: String,
        /// Which constraint.
        constraint: String,
        /// The missing property.
        property: String,
    },

    /// A key, index or foreign key lists the same property more than once.
    #[error("{constraint} on entity '{entity}' lists property '{property}' more than once")]
    DuplicateConstraintProperty {
        /// The owning entity.
        entity: String,
        /// Which constraint.
        constraint: String,
        /// The repeated property.
        property: String,
    },
}
