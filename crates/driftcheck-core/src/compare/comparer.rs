//! Comparison driver.

use super::config::CompareConfig;
use super::context::CompareContext;
use super::entity::{compare_entity, table_not_found};
use super::log::{
    count_errors, has_errors, list_all_errors, logs_to_json, CompareAttribute, CompareLog, CompareState,
    CompareType,
};
use super::provider::DatabaseProvider;
use crate::catalog::DeclaredModel;
use crate::database::{DatabaseModel, TableDef};
use crate::error::Error;

/// Compares a declared model with discovered databases.
///
/// One comparer holds the log of its most recent run. Comparers share
/// nothing mutable, so separate comparers over the same model and provider
/// can run on separate threads.
pub struct ModelComparer<'a> {
    model: &'a DeclaredModel,
    provider: &'a dyn DatabaseProvider,
    config: CompareConfig,
    logs: Vec<CompareLog>,
}

impl<'a> ModelComparer<'a> {
    /// Create a comparer with the default configuration.
    pub fn new(model: &'a DeclaredModel, provider: &'a dyn DatabaseProvider) -> Self {
        Self {
            model,
            provider,
            config: CompareConfig::default(),
            logs: Vec::new(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: CompareConfig) -> Self {
        self.config = config;
        self
    }

    /// Compare the declared model with `database`.
    ///
    /// Returns `Ok(true)` when any difference was found. Each call starts a
    /// fresh log. An invalid declared model is an error, not a difference.
    #[tracing::instrument(skip_all, fields(model = %self.model.name, provider = self.provider.name()))]
    pub fn compare_model_to_database(&mut self, database: &DatabaseModel) -> Result<bool, Error> {
        self.logs.clear();

        if let Err(e) = self.model.validate() {
            tracing::warn!(error = %e, "declared model failed validation");
            return Err(e.into());
        }

        tracing::debug!(entities = ?self.model.entity_names(), "declared model is valid");

        let ctx = CompareContext::new(self.provider, &self.config, database);
        let mut logs = Vec::with_capacity(self.model.entities.len());

        for entity in &self.model.entities {
            match ctx.find_table(database, &entity.table) {
                Some(table) => {
                    tracing::debug!(
                        entity = %entity.name,
                        table = %table.table_name(),
                        "comparing entity"
                    );
                    logs.push(compare_entity(&ctx, entity, table));
                }
                None => {
                    tracing::debug!(entity = %entity.name, table = %entity.table, "table not found");
                    logs.push(table_not_found(entity));
                }
            }
        }

        if self.config.report_extra_tables {
            for table in &database.tables {
                if self.is_extra_table(&ctx, table) {
                    logs.push(extra_table(table));
                }
            }
        }

        self.logs = logs;
        let errors = count_errors(&self.logs);
        tracing::info!(
            entities = self.model.entities.len(),
            tables = database.tables.len(),
            errors,
            "comparison complete"
        );
        Ok(errors > 0)
    }

    fn is_extra_table(&self, ctx: &CompareContext<'_>, table: &TableDef) -> bool {
        let mapped = self
            .model
            .entities
            .iter()
            .any(|e| ctx.same_table(&e.table, table.schema.as_deref(), &table.name));
        if mapped {
            return false;
        }
        let schema = table.schema.as_deref().or(ctx.default_schema());
        if self.config.is_ignored(schema, &table.name) {
            tracing::debug!(table = %table.table_name(), "ignoring table");
            return false;
        }
        true
    }

    /// Log of the most recent run.
    pub fn logs(&self) -> &[CompareLog] {
        &self.logs
    }

    /// Whether the most recent run found differences.
    pub fn has_errors(&self) -> bool {
        has_errors(&self.logs)
    }

    /// Every failing leaf of the most recent run, rendered with its path.
    pub fn list_all_errors(&self) -> Vec<String> {
        list_all_errors(&self.logs)
    }

    /// The log of the most recent run as pretty-printed JSON.
    pub fn logs_to_json(&self) -> Result<String, Error> {
        logs_to_json(&self.logs)
    }
}

fn extra_table(table: &TableDef) -> CompareLog {
    let name = table.table_name().to_string();
    CompareLog::new(
        CompareType::Table,
        CompareState::ExtraInDatabase,
        name.clone(),
        CompareAttribute::TableName,
        None,
        Some(name),
    )
}
