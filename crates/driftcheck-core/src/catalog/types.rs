//! Core type definitions for the declared model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar data types a declared property can carry.
///
/// Each provider maps these onto its canonical store type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    /// Boolean value.
    Bool,
    /// Unsigned 8-bit integer.
    Byte,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// Fixed-precision decimal.
    Decimal,
    /// Unicode string.
    String,
    /// Binary data.
    Bytes,
    /// Calendar date without time.
    Date,
    /// Date and time without offset.
    DateTime,
    /// Date and time with a UTC offset.
    DateTimeOffset,
    /// Time of day.
    Time,
    /// UUID (128-bit identifier).
    Uuid,
}

/// When a column's value is produced by the database rather than the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ValueGenerated {
    /// Always supplied by the caller.
    #[default]
    Never,
    /// Generated when the row is inserted.
    OnAdd,
    /// Generated when the row is updated.
    OnUpdate,
    /// Generated on every insert and update.
    OnAddOrUpdate,
}

impl fmt::Display for ValueGenerated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueGenerated::Never => write!(f, "Never"),
            ValueGenerated::OnAdd => write!(f, "OnAdd"),
            ValueGenerated::OnUpdate => write!(f, "OnUpdate"),
            ValueGenerated::OnAddOrUpdate => write!(f, "OnAddOrUpdate"),
        }
    }
}

/// Action taken on dependent rows when a principal row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReferentialAction {
    /// No action (the database default).
    #[default]
    NoAction,
    /// Reject the delete.
    Restrict,
    /// Delete dependent rows.
    Cascade,
    /// Null out the foreign key columns.
    SetNull,
    /// Reset the foreign key columns to their defaults.
    SetDefault,
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferentialAction::NoAction => write!(f, "NoAction"),
            ReferentialAction::Restrict => write!(f, "Restrict"),
            ReferentialAction::Cascade => write!(f, "Cascade"),
            ReferentialAction::SetNull => write!(f, "SetNull"),
            ReferentialAction::SetDefault => write!(f, "SetDefault"),
        }
    }
}

/// Schema-qualified table identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableName {
    /// Schema name; `None` means the database's default schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
}

impl TableName {
    /// A table in the default schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// A table in an explicit schema.
    pub fn with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
