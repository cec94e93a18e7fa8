//! Diff log - the hierarchical result of one comparison run.
//!
//! Every check appends one entry. Attribute diagnostics live under the entity
//! they belong to and carry the type and name of the element they describe,
//! so a rendered error reads `MyEntity->Property 'MyInt', value generated`.
//! Failure is decided by scanning leaves; a parent's state is informational.

use super::values::render;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareState {
    /// Declared and discovered agree.
    Ok,
    /// Declared but not found in the database.
    NotInDatabase,
    /// Found in the database but not declared.
    ExtraInDatabase,
    /// Present on both sides with different values.
    Different,
}

impl CompareState {
    /// Whether this state counts as an error.
    pub fn is_error(&self) -> bool {
        *self != CompareState::Ok
    }
}

impl fmt::Display for CompareState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareState::Ok => write!(f, "OK"),
            CompareState::NotInDatabase => write!(f, "NOT IN DATABASE"),
            CompareState::ExtraInDatabase => write!(f, "EXTRA IN DATABASE"),
            CompareState::Different => write!(f, "DIFFERENT"),
        }
    }
}

/// Kind of schema element an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareType {
    /// A declared entity.
    Entity,
    /// A database table.
    Table,
    /// A declared property.
    Property,
    /// A database column.
    Column,
    /// A primary key constraint.
    PrimaryKey,
    /// An index.
    Index,
    /// A foreign key constraint.
    ForeignKey,
}

impl fmt::Display for CompareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompareType::Entity => "Entity",
            CompareType::Table => "Table",
            CompareType::Property => "Property",
            CompareType::Column => "Column",
            CompareType::PrimaryKey => "PrimaryKey",
            CompareType::Index => "Index",
            CompareType::ForeignKey => "ForeignKey",
        };
        f.write_str(name)
    }
}

/// Which attribute of an element a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompareAttribute {
    /// No specific attribute (summary entries).
    #[default]
    NotSet,
    TableName,
    ColumnName,
    ColumnType,
    Nullability,
    DefaultValueSql,
    ComputedColumnSql,
    ValueGenerated,
    ColumnOrder,
    Unique,
    PrincipalTable,
    DeleteBehavior,
}

impl CompareAttribute {
    /// Whether this is the placeholder attribute.
    pub fn is_not_set(&self) -> bool {
        *self == CompareAttribute::NotSet
    }
}

impl fmt::Display for CompareAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = match self {
            CompareAttribute::NotSet => "not set",
            CompareAttribute::TableName => "table name",
            CompareAttribute::ColumnName => "column name",
            CompareAttribute::ColumnType => "column type",
            CompareAttribute::Nullability => "nullability",
            CompareAttribute::DefaultValueSql => "default value sql",
            CompareAttribute::ComputedColumnSql => "computed column sql",
            CompareAttribute::ValueGenerated => "value generated",
            CompareAttribute::ColumnOrder => "column order",
            CompareAttribute::Unique => "unique",
            CompareAttribute::PrincipalTable => "principal table",
            CompareAttribute::DeleteBehavior => "delete behavior",
        };
        f.write_str(words)
    }
}

/// One entry of the diff log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareLog {
    /// Outcome.
    pub state: CompareState,
    /// Kind of element described.
    #[serde(rename = "type")]
    pub kind: CompareType,
    /// Name of the element.
    pub name: String,
    /// Attribute the diagnostic is about.
    #[serde(default, skip_serializing_if = "CompareAttribute::is_not_set")]
    pub attribute: CompareAttribute,
    /// Declared value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Discovered value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found: Option<String>,
    /// Child entries, in insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_logs: Vec<CompareLog>,
}

impl CompareLog {
    /// Create an entry.
    pub fn new(
        kind: CompareType,
        state: CompareState,
        name: impl Into<String>,
        attribute: CompareAttribute,
        expected: Option<String>,
        found: Option<String>,
    ) -> Self {
        Self {
            state,
            kind,
            name: name.into(),
            attribute,
            expected,
            found,
            sub_logs: Vec::new(),
        }
    }

    /// Create an `Ok` entry with no attribute.
    pub fn ok(kind: CompareType, name: impl Into<String>) -> Self {
        Self::new(
            kind,
            CompareState::Ok,
            name,
            CompareAttribute::NotSet,
            None,
            None,
        )
    }

    /// Whether this entry has no children.
    pub fn is_leaf(&self) -> bool {
        self.sub_logs.is_empty()
    }

    /// Whether this entry is a failing leaf diagnostic.
    pub fn is_error(&self) -> bool {
        self.is_leaf() && self.state.is_error()
    }

    /// Render this entry with `prefix` placed before the element type.
    pub fn message(&self, prefix: &str) -> String {
        let mut out = format!("{}: {}{} '{}'", self.state, prefix, self.kind, self.name);
        if self.attribute.is_not_set() && self.expected.is_none() && self.found.is_none() {
            return out;
        }
        if !self.attribute.is_not_set() {
            out.push_str(&format!(", {}", self.attribute));
        }
        out.push_str(&format!(". Expected = {}", render(self.expected.as_deref())));
        if self.state != CompareState::NotInDatabase {
            out.push_str(&format!(", found = {}", render(self.found.as_deref())));
        }
        out
    }
}

impl fmt::Display for CompareLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message(""))
    }
}

/// Visit every entry in pre-order, passing the names of its ancestors.
pub fn walk<'a, F>(logs: &'a [CompareLog], visit: &mut F)
where
    F: FnMut(&[&'a str], &'a CompareLog),
{
    let mut parents = Vec::new();
    walk_inner(logs, &mut parents, visit);
}

fn walk_inner<'a, F>(logs: &'a [CompareLog], parents: &mut Vec<&'a str>, visit: &mut F)
where
    F: FnMut(&[&'a str], &'a CompareLog),
{
    for log in logs {
        visit(parents, log);
        if !log.sub_logs.is_empty() {
            parents.push(&log.name);
            walk_inner(&log.sub_logs, parents, visit);
            parents.pop();
        }
    }
}

/// Render an ancestor path as `A->B->`.
pub fn path_prefix(parents: &[&str]) -> String {
    parents.iter().map(|name| format!("{name}->")).collect()
}

/// Render every failing leaf, in pre-order, prefixed by its ancestors' names.
pub fn list_all_errors(logs: &[CompareLog]) -> Vec<String> {
    let mut errors = Vec::new();
    walk(logs, &mut |parents, log| {
        if log.is_error() {
            errors.push(log.message(&path_prefix(parents)));
        }
    });
    errors
}

/// Count failing leaves.
pub fn count_errors(logs: &[CompareLog]) -> usize {
    let mut count = 0;
    walk(logs, &mut |_, log| {
        if log.is_error() {
            count += 1;
        }
    });
    count
}

/// Pretty-printed JSON of a diff log.
pub fn logs_to_json(logs: &[CompareLog]) -> Result<String, Error> {
    serde_json::to_string_pretty(logs).map_err(|e| Error::Serialization(e.to_string()))
}

/// Whether any leaf failed.
pub fn has_errors(logs: &[CompareLog]) -> bool {
    logs.iter().any(|log| {
        if log.is_leaf() {
            log.state.is_error()
        } else {
            has_errors(&log.sub_logs)
        }
    })
}
