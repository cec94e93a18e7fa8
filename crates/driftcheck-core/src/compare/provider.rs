//! Vendor-specific knowledge the comparison needs.
//!
//! A [`DatabaseProvider`] maps declared scalar types onto store type names,
//! decides which store type spellings are equivalent, names the default
//! schema and infers value generation from column metadata. Everything else
//! in the engine is vendor-neutral.

use crate::catalog::{PropertyDef, ScalarType, TableName, ValueGenerated};
use crate::database::ColumnDef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-database capabilities used by the comparators.
pub trait DatabaseProvider: Send + Sync {
    /// Provider name, used in logs.
    fn name(&self) -> &'static str;

    /// Schema that unqualified table names resolve to.
    fn default_schema(&self) -> Option<&str>;

    /// Canonical store type for a scalar type.
    fn canonical_type(&self, scalar: ScalarType) -> &'static str;

    /// Expected store type of a declared property.
    fn store_type(&self, property: &PropertyDef) -> String {
        property
            .column_type
            .clone()
            .unwrap_or_else(|| self.canonical_type(property.scalar_type).to_string())
    }

    /// Whether a declared store type and a discovered one name the same type.
    fn type_names_equivalent(&self, declared: &str, discovered: &str) -> bool {
        declared.trim().eq_ignore_ascii_case(discovered.trim())
    }

    /// Value generation implied by a discovered column's metadata.
    fn infer_value_generated(&self, column: &ColumnDef) -> ValueGenerated {
        infer_value_generated(column)
    }

    /// Conventional primary key constraint name for a table.
    fn primary_key_name(&self, table: &TableName) -> String {
        format!("PK_{}", table.name)
    }
}

/// Vendor-neutral value generation inference.
///
/// Computed columns are regenerated on every write; identity columns and
/// columns with a default are generated on insert.
pub fn infer_value_generated(column: &ColumnDef) -> ValueGenerated {
    if has_text(column.computed_column_sql.as_deref()) {
        ValueGenerated::OnAddOrUpdate
    } else if column.is_identity || has_text(column.default_value_sql.as_deref()) {
        ValueGenerated::OnAdd
    } else {
        ValueGenerated::Never
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Split `nvarchar(max)` into `("nvarchar", Some("max"))`.
///
/// Text after the closing parenthesis stays part of the base name, so
/// `timestamp(6) with time zone` becomes `("timestamp with time zone", Some("6"))`.
fn split_type(name: &str) -> (String, Option<String>) {
    let name = name.trim().to_ascii_lowercase();
    let Some((head, rest)) = name.split_once('(') else {
        return (collapse_spaces(&name), None);
    };
    match rest.split_once(')') {
        Some((params, suffix)) => (
            collapse_spaces(&format!("{head} {suffix}")),
            Some(params.replace(' ', "")),
        ),
        None => (collapse_spaces(head), Some(rest.replace(' ', ""))),
    }
}

fn collapse_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn join_type(base: &str, params: Option<String>) -> String {
    match params {
        Some(params) => format!("{base}({params})"),
        None => base.to_string(),
    }
}

/// Microsoft SQL Server.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerProvider;

impl SqlServerProvider {
    fn normalize(name: &str) -> String {
        let (base, params) = split_type(name);
        let base = match base.as_str() {
            "integer" => "int",
            "numeric" => "decimal",
            "double precision" => "float",
            "rowversion" => "timestamp",
            other => other,
        }
        .to_string();
        // Default precisions SQL Server reports but DDL usually omits.
        let params = match (base.as_str(), params.as_deref()) {
            ("datetime2" | "time" | "datetimeoffset", Some("7")) => None,
            ("float", Some("53")) => None,
            ("decimal", Some("18,0")) => None,
            _ => params,
        };
        join_type(&base, params)
    }
}

impl DatabaseProvider for SqlServerProvider {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn default_schema(&self) -> Option<&str> {
        Some("dbo")
    }

    fn canonical_type(&self, scalar: ScalarType) -> &'static str {
        match scalar {
            ScalarType::Bool => "bit",
            ScalarType::Byte => "tinyint",
            ScalarType::Int16 => "smallint",
            ScalarType::Int32 => "int",
            ScalarType::Int64 => "bigint",
            ScalarType::Float32 => "real",
            ScalarType::Float64 => "float",
            ScalarType::Decimal => "decimal(18,2)",
            ScalarType::String => "nvarchar(max)",
            ScalarType::Bytes => "varbinary(max)",
            ScalarType::Date => "date",
            ScalarType::DateTime => "datetime2",
            ScalarType::DateTimeOffset => "datetimeoffset",
            ScalarType::Time => "time",
            ScalarType::Uuid => "uniqueidentifier",
        }
    }

    fn type_names_equivalent(&self, declared: &str, discovered: &str) -> bool {
        Self::normalize(declared) == Self::normalize(discovered)
    }
}

/// PostgreSQL.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresProvider;

impl PostgresProvider {
    fn normalize(name: &str) -> String {
        let (base, params) = split_type(name);
        let base = match base.as_str() {
            "int" | "int4" | "serial" | "serial4" => "integer",
            "int8" | "bigserial" | "serial8" => "bigint",
            "int2" | "smallserial" | "serial2" => "smallint",
            "bool" => "boolean",
            "float8" => "double precision",
            "float4" => "real",
            "decimal" => "numeric",
            "varchar" => "character varying",
            "char" | "bpchar" => "character",
            "timestamp" => "timestamp without time zone",
            "timestamptz" => "timestamp with time zone",
            "time" => "time without time zone",
            "timetz" => "time with time zone",
            other => other,
        }
        .to_string();
        join_type(&base, params)
    }
}

impl DatabaseProvider for PostgresProvider {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn default_schema(&self) -> Option<&str> {
        Some("public")
    }

    fn canonical_type(&self, scalar: ScalarType) -> &'static str {
        match scalar {
            ScalarType::Bool => "boolean",
            ScalarType::Byte | ScalarType::Int16 => "smallint",
            ScalarType::Int32 => "integer",
            ScalarType::Int64 => "bigint",
            ScalarType::Float32 => "real",
            ScalarType::Float64 => "double precision",
            ScalarType::Decimal => "numeric",
            ScalarType::String => "text",
            ScalarType::Bytes => "bytea",
            ScalarType::Date => "date",
            ScalarType::DateTime => "timestamp without time zone",
            ScalarType::DateTimeOffset => "timestamp with time zone",
            ScalarType::Time => "time without time zone",
            ScalarType::Uuid => "uuid",
        }
    }

    fn type_names_equivalent(&self, declared: &str, discovered: &str) -> bool {
        Self::normalize(declared) == Self::normalize(discovered)
    }
}

/// SQLite.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteProvider;

impl DatabaseProvider for SqliteProvider {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn default_schema(&self) -> Option<&str> {
        None
    }

    fn canonical_type(&self, scalar: ScalarType) -> &'static str {
        match scalar {
            ScalarType::Bool
            | ScalarType::Byte
            | ScalarType::Int16
            | ScalarType::Int32
            | ScalarType::Int64 => "INTEGER",
            ScalarType::Float32 | ScalarType::Float64 => "REAL",
            ScalarType::Bytes => "BLOB",
            ScalarType::Decimal
            | ScalarType::String
            | ScalarType::Date
            | ScalarType::DateTime
            | ScalarType::DateTimeOffset
            | ScalarType::Time
            | ScalarType::Uuid => "TEXT",
        }
    }
}

/// Built-in providers, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Microsoft SQL Server.
    #[default]
    SqlServer,
    /// PostgreSQL.
    Postgres,
    /// SQLite.
    Sqlite,
}

impl ProviderKind {
    /// Instantiate the provider.
    pub fn provider(&self) -> Box<dyn DatabaseProvider> {
        match self {
            ProviderKind::SqlServer => Box::new(SqlServerProvider),
            ProviderKind::Postgres => Box::new(PostgresProvider),
            ProviderKind::Sqlite => Box::new(SqliteProvider),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::SqlServer => write!(f, "sql-server"),
            ProviderKind::Postgres => write!(f, "postgres"),
            ProviderKind::Sqlite => write!(f, "sqlite"),
        }
    }
}
