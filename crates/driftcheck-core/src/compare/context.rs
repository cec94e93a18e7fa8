//! Shared state for one comparison run.

use super::config::CompareConfig;
use super::provider::DatabaseProvider;
use super::values::NameComparison;
use crate::catalog::TableName;
use crate::database::{ColumnDef, DatabaseModel, TableDef};

/// Read-only inputs every comparator needs.
#[derive(Clone, Copy)]
pub struct CompareContext<'a> {
    pub provider: &'a dyn DatabaseProvider,
    pub config: &'a CompareConfig,
    default_schema: Option<&'a str>,
}

impl<'a> CompareContext<'a> {
    /// Build a context for comparing against `database`.
    ///
    /// The discovered model's default schema wins over the provider's.
    pub fn new(
        provider: &'a dyn DatabaseProvider,
        config: &'a CompareConfig,
        database: &'a DatabaseModel,
    ) -> Self {
        let default_schema = database
            .default_schema
            .as_deref()
            .or_else(|| provider.default_schema());
        Self {
            provider,
            config,
            default_schema,
        }
    }

    /// Name comparison mode.
    pub fn names(&self) -> NameComparison {
        self.config.name_comparison
    }

    /// Schema an unqualified name resolves to.
    pub fn default_schema(&self) -> Option<&'a str> {
        self.default_schema
    }

    fn resolve_schema<'s>(&self, schema: Option<&'s str>) -> Option<&'s str>
    where
        'a: 's,
    {
        schema.or(self.default_schema)
    }

    /// Whether a declared table name and a discovered `schema.name` identify the same table.
    pub fn same_table(&self, declared: &TableName, schema: Option<&str>, name: &str) -> bool {
        let names = self.names();
        names.eq(&declared.name, name)
            && names.eq_opt(
                self.resolve_schema(declared.schema.as_deref()),
                self.resolve_schema(schema),
            )
    }

    /// Find the discovered table a declared table name maps to.
    pub fn find_table<'d>(
        &self,
        database: &'d DatabaseModel,
        declared: &TableName,
    ) -> Option<&'d TableDef> {
        database
            .tables
            .iter()
            .find(|t| self.same_table(declared, t.schema.as_deref(), &t.name))
    }

    /// Find a column by name.
    pub fn find_column<'d>(&self, table: &'d TableDef, name: &str) -> Option<&'d ColumnDef> {
        let names = self.names();
        table.columns.iter().find(|c| names.eq(&c.name, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::provider::{SqlServerProvider, SqliteProvider};

    fn database() -> DatabaseModel {
        DatabaseModel::new()
            .with_table(TableDef::new("MyEntities").in_schema("dbo"))
            .with_table(TableDef::new("Log").in_schema("audit"))
    }

    #[test]
    fn test_unqualified_name_uses_provider_schema() {
        let config = CompareConfig::default();
        let database = database();
        let ctx = CompareContext::new(&SqlServerProvider, &config, &database);

        assert_eq!(ctx.default_schema(), Some("dbo"));
        assert!(ctx
            .find_table(&database, &TableName::new("MyEntities"))
            .is_some());
        assert!(ctx.find_table(&database, &TableName::new("Log")).is_none());
        assert!(ctx
            .find_table(&database, &TableName::with_schema("audit", "Log"))
            .is_some());
        assert!(ctx
            .find_table(&database, &TableName::with_schema("MySchema", "MyEntities"))
            .is_none());
    }

    #[test]
    fn test_database_schema_wins() {
        let config = CompareConfig::default();
        let database = database().with_default_schema("audit");
        let ctx = CompareContext::new(&SqlServerProvider, &config, &database);

        assert_eq!(ctx.default_schema(), Some("audit"));
        assert!(ctx.find_table(&database, &TableName::new("Log")).is_some());
    }

    #[test]
    fn test_schemaless_provider() {
        let config = CompareConfig::default();
        let database = DatabaseModel::new().with_table(TableDef::new("blogs"));
        let ctx = CompareContext::new(&SqliteProvider, &config, &database);

        assert_eq!(ctx.default_schema(), None);
        assert!(ctx.find_table(&database, &TableName::new("blogs")).is_some());
    }

    #[test]
    fn test_find_column_honors_name_comparison() {
        let table = TableDef::new("MyEntities").with_column(ColumnDef::new("MyInt", "int"));
        let database = DatabaseModel::new();

        let config = CompareConfig::default();
        let ctx = CompareContext::new(&SqlServerProvider, &config, &database);
        assert!(ctx.find_column(&table, "myint").is_none());

        let config = CompareConfig::new().with_name_comparison(NameComparison::IgnoreCase);
        let ctx = CompareContext::new(&SqlServerProvider, &config, &database);
        assert!(ctx.find_column(&table, "myint").is_some());
    }
}
