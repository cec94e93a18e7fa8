//! Comparison configuration.

use super::values::NameComparison;
use serde::{Deserialize, Serialize};

/// Options controlling what a comparison run checks and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// How table, column and constraint names are matched.
    pub name_comparison: NameComparison,
    /// Tables (`schema.table` or `table`) never reported as extra.
    pub tables_to_ignore: Vec<String>,
    /// Report discovered tables no entity maps to.
    pub report_extra_tables: bool,
    /// Report discovered columns no property maps to.
    pub report_extra_columns: bool,
    /// Compare declared indexes.
    pub check_indexes: bool,
    /// Compare declared foreign keys.
    pub check_foreign_keys: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            name_comparison: NameComparison::CaseSensitive,
            tables_to_ignore: Vec::new(),
            report_extra_tables: false,
            report_extra_columns: false,
            check_indexes: true,
            check_foreign_keys: true,
        }
    }
}

impl CompareConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name comparison mode.
    pub fn with_name_comparison(mut self, name_comparison: NameComparison) -> Self {
        self.name_comparison = name_comparison;
        self
    }

    /// Ignore a table when reporting extra tables.
    pub fn ignore_table(mut self, table: impl Into<String>) -> Self {
        self.tables_to_ignore.push(table.into());
        self
    }

    /// Ignore every table in a comma-separated list.
    pub fn ignore_tables_delimited(mut self, tables: &str) -> Self {
        self.tables_to_ignore.extend(
            tables
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
        );
        self
    }

    /// Report extra tables.
    pub fn with_extra_tables(mut self) -> Self {
        self.report_extra_tables = true;
        self
    }

    /// Report extra columns.
    pub fn with_extra_columns(mut self) -> Self {
        self.report_extra_columns = true;
        self
    }

    /// Skip index comparison.
    pub fn without_indexes(mut self) -> Self {
        self.check_indexes = false;
        self
    }

    /// Skip foreign key comparison.
    pub fn without_foreign_keys(mut self) -> Self {
        self.check_foreign_keys = false;
        self
    }

    /// Whether a discovered table is on the ignore list.
    ///
    /// Entries with a schema must match both parts; bare entries match the
    /// table name in any schema.
    pub fn is_ignored(&self, schema: Option<&str>, name: &str) -> bool {
        let names = self.name_comparison;
        self.tables_to_ignore
            .iter()
            .any(|entry| match entry.split_once('.') {
                Some((entry_schema, entry_name)) => {
                    names.eq_opt(Some(entry_schema), schema) && names.eq(entry_name, name)
                }
                None => names.eq(entry, name),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompareConfig::default();

        assert_eq!(config.name_comparison, NameComparison::CaseSensitive);
        assert!(!config.report_extra_tables);
        assert!(!config.report_extra_columns);
        assert!(config.check_indexes);
        assert!(config.check_foreign_keys);
    }

    #[test]
    fn test_builder() {
        let config = CompareConfig::new()
            .with_name_comparison(NameComparison::IgnoreCase)
            .with_extra_tables()
            .with_extra_columns()
            .without_indexes()
            .without_foreign_keys();

        assert_eq!(config.name_comparison, NameComparison::IgnoreCase);
        assert!(config.report_extra_tables);
        assert!(config.report_extra_columns);
        assert!(!config.check_indexes);
        assert!(!config.check_foreign_keys);
    }

    #[test]
    fn test_ignore_tables() {
        let config = CompareConfig::new().ignore_tables_delimited("__MigrationHistory, audit.Log,");

        assert_eq!(config.tables_to_ignore.len(), 2);
        assert!(config.is_ignored(Some("dbo"), "__MigrationHistory"));
        assert!(config.is_ignored(Some("audit"), "Log"));
        assert!(!config.is_ignored(Some("dbo"), "Log"));
        assert!(!config.is_ignored(None, "Users"));
    }

    #[test]
    fn test_ignore_tables_case() {
        let config = CompareConfig::new()
            .ignore_table("Audit.Log")
            .with_name_comparison(NameComparison::IgnoreCase);

        assert!(config.is_ignored(Some("audit"), "log"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CompareConfig =
            serde_json::from_str(r#"{ "report_extra_tables": true }"#).unwrap();

        assert!(config.report_extra_tables);
        assert!(config.check_indexes);
    }
}
