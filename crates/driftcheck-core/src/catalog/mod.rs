//! Declared model for driftcheck.
//!
//! The declared model describes the schema mapping code expects: entities,
//! their target tables, properties, keys, indexes and foreign keys.

mod constraint;
mod entity;
mod model;
mod property;
mod types;

pub use constraint::{ForeignKeyDef, IndexDef, KeyDef};
pub use entity::EntityDef;
pub use model::DeclaredModel;
pub use property::PropertyDef;
pub use types::{ReferentialAction, ScalarType, TableName, ValueGenerated};
