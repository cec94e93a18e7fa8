//! Entity-to-table comparison.

use super::context::CompareContext;
use super::key::{compare_foreign_keys, compare_indexes, PrimaryKeyCheck};
use super::log::{has_errors, CompareAttribute, CompareLog, CompareState, CompareType};
use super::logger::CompareLogger;
use super::property::{compare_property, property_not_found, PropertyPair};
use crate::catalog::EntityDef;
use crate::database::TableDef;
use tracing::trace;

/// Compare an entity with the table it maps to.
///
/// The returned entry holds one child per property (either `Ok` or its
/// diagnostics), primary key diagnostics next to the key property they
/// concern, then the key column list, extra columns, indexes and foreign keys.
pub fn compare_entity(ctx: &CompareContext<'_>, entity: &EntityDef, table: &TableDef) -> CompareLog {
    let mut logs = Vec::new();
    let mut key = PrimaryKeyCheck::new(ctx, entity, table);

    for property in &entity.properties {
        let Some(column) = ctx.find_column(table, &property.column_name) else {
            trace!(entity = %entity.name, property = %property.name, "column not found");
            property_not_found(&mut logs, property);
            continue;
        };

        let mut logger = CompareLogger::new(&mut logs, CompareType::Property, &property.name);
        compare_property(ctx, PropertyPair { property, column }, &mut logger);

        if entity.is_key_property(&property.name) {
            key.check_member(ctx, &mut logs, &column.name);
        }
    }

    key.check_columns(ctx, &mut logs);

    if ctx.config.report_extra_columns {
        report_extra_columns(ctx, entity, table, &mut logs);
    }
    if ctx.config.check_indexes {
        compare_indexes(ctx, entity, table, &mut logs);
    }
    if ctx.config.check_foreign_keys {
        compare_foreign_keys(ctx, entity, table, &mut logs);
    }

    let state = if has_errors(&logs) {
        CompareState::Different
    } else {
        CompareState::Ok
    };
    let mut log = CompareLog::ok(CompareType::Entity, &entity.name);
    log.state = state;
    log.sub_logs = logs;
    log
}

/// The entry for an entity whose table does not exist.
pub fn table_not_found(entity: &EntityDef) -> CompareLog {
    CompareLog::new(
        CompareType::Entity,
        CompareState::NotInDatabase,
        &entity.name,
        CompareAttribute::TableName,
        Some(entity.table.to_string()),
        None,
    )
}

fn report_extra_columns(
    ctx: &CompareContext<'_>,
    entity: &EntityDef,
    table: &TableDef,
    logs: &mut Vec<CompareLog>,
) {
    let names = ctx.names();
    for column in &table.columns {
        let mapped = entity
            .properties
            .iter()
            .any(|p| names.eq(&p.column_name, &column.name));
        if !mapped {
            CompareLogger::new(logs, CompareType::Column, &column.name)
                .extra_in_database(column.name.as_str(), CompareAttribute::ColumnName);
        }
    }
}
