//! Driftcheck Core - declared model vs. database schema comparison.
//!
//! Load a [`DeclaredModel`] (what the mapping code expects) and a
//! [`DatabaseModel`] (what introspection found), then run a
//! [`ModelComparer`] to get a hierarchical diff log.

pub mod catalog;
pub mod compare;
pub mod database;
pub mod error;

pub use catalog::{
    DeclaredModel, EntityDef, ForeignKeyDef, IndexDef, KeyDef, PropertyDef, ReferentialAction,
    ScalarType, TableName, ValueGenerated,
};
pub use compare::{
    list_all_errors, CompareAttribute, CompareConfig, CompareLog, CompareState, CompareType,
    DatabaseProvider, ModelComparer, NameComparison, ProviderKind,
};
pub use database::{
    ColumnDef, DatabaseModel, ForeignKeyConstraint, IndexConstraint, PrimaryKeyConstraint,
    TableDef,
};
pub use error::{Error, ModelError};
