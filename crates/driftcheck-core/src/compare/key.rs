//! Primary key, index and foreign key comparison.

use super::context::CompareContext;
use super::log::{CompareAttribute, CompareLog, CompareType};
use super::logger::CompareLogger;
use super::values::{join_columns, uniqueness};
use crate::catalog::{EntityDef, KeyDef};
use crate::database::{PrimaryKeyConstraint, TableDef};

/// Primary key checks for one entity/table pair.
///
/// Membership is checked per key property as properties are visited, so key
/// diagnostics sit next to the property they concern; the column list as a
/// whole is checked once all properties are done.
pub struct PrimaryKeyCheck<'a> {
    name: String,
    declared: Option<Vec<String>>,
    discovered: Option<&'a PrimaryKeyConstraint>,
    reported: bool,
}

impl<'a> PrimaryKeyCheck<'a> {
    /// Prepare the check. The logger name is the declared key name, or the
    /// provider's conventional one.
    pub fn new(ctx: &CompareContext<'_>, entity: &EntityDef, table: &'a TableDef) -> Self {
        let key = entity.primary_key.as_ref();
        let name = key
            .and_then(|k| k.name.clone())
            .unwrap_or_else(|| ctx.provider.primary_key_name(&entity.table));
        Self {
            name,
            declared: key.map(|k| key_columns(entity, k)),
            discovered: table.primary_key.as_ref(),
            reported: false,
        }
    }

    /// Check that `column` is part of the discovered key. Returns whether an error was recorded.
    pub fn check_member(
        &mut self,
        ctx: &CompareContext<'_>,
        logs: &mut Vec<CompareLog>,
        column: &str,
    ) -> bool {
        let names = ctx.names();
        let present = self
            .discovered
            .is_some_and(|pk| pk.columns.iter().any(|c| names.eq(c, column)));
        if present {
            return false;
        }
        CompareLogger::new(logs, CompareType::PrimaryKey, &self.name)
            .not_in_database(column, CompareAttribute::ColumnName);
        self.reported = true;
        true
    }

    /// Compare the declared and discovered column lists once all members are checked.
    ///
    /// The same columns in another order give a `column order` entry. Discovered
    /// columns outside the declared key give a `column name` entry, unless a
    /// member check already reported this key.
    pub fn check_columns(&mut self, ctx: &CompareContext<'_>, logs: &mut Vec<CompareLog>) -> bool {
        let (Some(declared), Some(discovered)) = (&self.declared, self.discovered) else {
            return false;
        };
        let names = ctx.names();
        let attribute = if names.sets_eq(declared, &discovered.columns) {
            if names.lists_eq(declared, &discovered.columns) {
                return false;
            }
            CompareAttribute::ColumnOrder
        } else {
            let has_extra = discovered
                .columns
                .iter()
                .any(|c| !declared.iter().any(|d| names.eq(d, c)));
            if self.reported || !has_extra {
                return false;
            }
            CompareAttribute::ColumnName
        };
        let expected = join_columns(declared);
        let found = join_columns(&discovered.columns);
        CompareLogger::new(logs, CompareType::PrimaryKey, &self.name).check_different(
            false,
            attribute,
            Some(&expected),
            Some(&found),
        );
        self.reported = true;
        true
    }
}

fn key_columns(entity: &EntityDef, key: &KeyDef) -> Vec<String> {
    entity
        .column_names(&key.properties)
        .unwrap_or_else(|| key.properties.clone())
}

/// Compare declared indexes against the table's indexes. Returns whether any failed.
pub fn compare_indexes(
    ctx: &CompareContext<'_>,
    entity: &EntityDef,
    table: &TableDef,
    logs: &mut Vec<CompareLog>,
) -> bool {
    let names = ctx.names();
    let mut has_errors = false;
    for index in &entity.indexes {
        let columns = entity
            .column_names(&index.properties)
            .unwrap_or_else(|| index.properties.clone());
        let mut logger = CompareLogger::new(logs, CompareType::Index, &index.name);
        let Some(found) = table
            .indexes
            .iter()
            .find(|i| names.lists_eq(&columns, &i.columns))
        else {
            logger.not_in_database(join_columns(&columns), CompareAttribute::ColumnName);
            has_errors = true;
            continue;
        };
        if logger.check_different(
            index.unique == found.unique,
            CompareAttribute::Unique,
            Some(uniqueness(index.unique)),
            Some(uniqueness(found.unique)),
        ) {
            has_errors = true;
        } else {
            logger.mark_as_ok();
        }
    }
    has_errors
}

/// Compare declared foreign keys against the table's foreign keys. Returns whether any failed.
pub fn compare_foreign_keys(
    ctx: &CompareContext<'_>,
    entity: &EntityDef,
    table: &TableDef,
    logs: &mut Vec<CompareLog>,
) -> bool {
    let names = ctx.names();
    let mut has_errors = false;
    for fk in &entity.foreign_keys {
        let columns = entity
            .column_names(&fk.properties)
            .unwrap_or_else(|| fk.properties.clone());
        let mut logger = CompareLogger::new(logs, CompareType::ForeignKey, &fk.name);
        let Some(found) = table
            .foreign_keys
            .iter()
            .find(|f| names.lists_eq(&columns, &f.columns))
        else {
            logger.not_in_database(join_columns(&columns), CompareAttribute::ColumnName);
            has_errors = true;
            continue;
        };

        let expected_table = fk.principal_table.to_string();
        let found_table = found.principal_table.to_string();
        let same_table = ctx.same_table(
            &fk.principal_table,
            found.principal_table.schema.as_deref(),
            &found.principal_table.name,
        );
        let mut failed = logger.check_different(
            same_table,
            CompareAttribute::PrincipalTable,
            Some(&expected_table),
            Some(&found_table),
        );
        failed |= logger.check_different(
            fk.on_delete == found.on_delete,
            CompareAttribute::DeleteBehavior,
            Some(&fk.on_delete.to_string()),
            Some(&found.on_delete.to_string()),
        );
        if failed {
            has_errors = true;
        } else {
            logger.mark_as_ok();
        }
    }
    has_errors
}
