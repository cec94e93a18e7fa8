//! Discovered database model.
//!
//! Produced by an introspection provider outside this crate and handed to
//! the comparison engine read-only.

mod model;
mod table;

pub use model::DatabaseModel;
pub use table::{ColumnDef, ForeignKeyConstraint, IndexConstraint, PrimaryKeyConstraint, TableDef};
