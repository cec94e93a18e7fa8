//! Model-to-database comparison.
//!
//! [`ModelComparer`] walks the declared model, matches each entity to a
//! discovered table and records every check in a [`CompareLog`] tree.
//! Vendor specifics (type names, default schema, value generation) come
//! from a [`DatabaseProvider`].

mod comparer;
mod config;
mod context;
mod entity;
mod key;
mod log;
mod logger;
mod property;
mod provider;
mod values;

pub use comparer::ModelComparer;
pub use config::CompareConfig;
pub use context::CompareContext;
pub use log::{
    count_errors, has_errors, list_all_errors, logs_to_json, path_prefix, walk, CompareAttribute, CompareLog,
    CompareState, CompareType,
};
pub use logger::CompareLogger;
pub use property::{rule_order, PropertyPair, PropertyRule, PROPERTY_RULES};
pub use provider::{
    infer_value_generated, DatabaseProvider, PostgresProvider, ProviderKind, SqlServerProvider,
    SqliteProvider,
};
pub use values::{normalize_sql, NameComparison, NULL_TOKEN};
