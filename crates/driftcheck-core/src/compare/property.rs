//! Property-to-column comparison.
//!
//! Each attribute check is a rule in [`PROPERTY_RULES`]. Rules run in
//! registry order and every rule runs, so one column can yield several
//! diagnostics; the order of the registry is the order of the leaves.

use super::context::CompareContext;
use super::log::{CompareAttribute, CompareLog, CompareType};
use super::logger::CompareLogger;
use super::values::{normalize_sql, nullability, sql_equal};
use crate::catalog::PropertyDef;
use crate::database::ColumnDef;

/// A declared property and the column it was matched to.
#[derive(Debug, Clone, Copy)]
pub struct PropertyPair<'a> {
    pub property: &'a PropertyDef,
    pub column: &'a ColumnDef,
}

/// A single attribute check. Returns whether it recorded an error.
pub type PropertyRule = fn(&CompareContext<'_>, PropertyPair<'_>, &mut CompareLogger<'_>) -> bool;

/// Attribute checks, in emission order.
pub const PROPERTY_RULES: &[(CompareAttribute, PropertyRule)] = &[
    (CompareAttribute::Nullability, check_nullability),
    (CompareAttribute::ColumnName, check_column_name),
    (CompareAttribute::ColumnType, check_column_type),
    (CompareAttribute::DefaultValueSql, check_default_sql),
    (CompareAttribute::ComputedColumnSql, check_computed_sql),
    (CompareAttribute::ValueGenerated, check_value_generated),
];

/// Attributes in the order they are checked.
pub fn rule_order() -> Vec<CompareAttribute> {
    PROPERTY_RULES.iter().map(|(attribute, _)| *attribute).collect()
}

/// Run every rule for one matched property. Returns whether any failed.
///
/// On success a single `Ok` entry is recorded for the property.
pub fn compare_property(
    ctx: &CompareContext<'_>,
    pair: PropertyPair<'_>,
    logger: &mut CompareLogger<'_>,
) -> bool {
    let has_errors = PROPERTY_RULES
        .iter()
        .fold(false, |failed, (_, rule)| rule(ctx, pair, logger) | failed);
    if !has_errors {
        logger.mark_as_ok();
    }
    has_errors
}

/// Record a property whose column is missing.
pub fn property_not_found(logs: &mut Vec<CompareLog>, property: &PropertyDef) {
    CompareLogger::new(logs, CompareType::Property, &property.name)
        .not_in_database(property.column_name.as_str(), CompareAttribute::ColumnName);
}

fn check_nullability(
    _ctx: &CompareContext<'_>,
    pair: PropertyPair<'_>,
    logger: &mut CompareLogger<'_>,
) -> bool {
    logger.check_different(
        pair.property.nullable == pair.column.nullable,
        CompareAttribute::Nullability,
        Some(nullability(pair.property.nullable)),
        Some(nullability(pair.column.nullable)),
    )
}

// Columns are looked up by name, so this only fires if lookup and comparison disagree.
fn check_column_name(
    ctx: &CompareContext<'_>,
    pair: PropertyPair<'_>,
    logger: &mut CompareLogger<'_>,
) -> bool {
    logger.check_different(
        ctx.names().eq(&pair.property.column_name, &pair.column.name),
        CompareAttribute::ColumnName,
        Some(&pair.property.column_name),
        Some(&pair.column.name),
    )
}

fn check_column_type(
    ctx: &CompareContext<'_>,
    pair: PropertyPair<'_>,
    logger: &mut CompareLogger<'_>,
) -> bool {
    let expected = ctx.provider.store_type(pair.property);
    logger.check_different(
        ctx.provider
            .type_names_equivalent(&expected, &pair.column.store_type),
        CompareAttribute::ColumnType,
        Some(&expected),
        Some(&pair.column.store_type),
    )
}

fn check_sql(
    logger: &mut CompareLogger<'_>,
    attribute: CompareAttribute,
    declared: Option<&str>,
    discovered: Option<&str>,
) -> bool {
    let expected = normalize_sql(declared);
    let found = normalize_sql(discovered);
    logger.check_different(
        sql_equal(declared, discovered),
        attribute,
        expected.as_deref(),
        found.as_deref(),
    )
}

fn check_default_sql(
    _ctx: &CompareContext<'_>,
    pair: PropertyPair<'_>,
    logger: &mut CompareLogger<'_>,
) -> bool {
    check_sql(
        logger,
        CompareAttribute::DefaultValueSql,
        pair.property.default_value_sql.as_deref(),
        pair.column.default_value_sql.as_deref(),
    )
}

fn check_computed_sql(
    _ctx: &CompareContext<'_>,
    pair: PropertyPair<'_>,
    logger: &mut CompareLogger<'_>,
) -> bool {
    check_sql(
        logger,
        CompareAttribute::ComputedColumnSql,
        pair.property.computed_column_sql.as_deref(),
        pair.column.computed_column_sql.as_deref(),
    )
}

fn check_value_generated(
    ctx: &CompareContext<'_>,
    pair: PropertyPair<'_>,
    logger: &mut CompareLogger<'_>,
) -> bool {
    let expected = pair.property.value_generated;
    let found = ctx.provider.infer_value_generated(pair.column);
    logger.check_different(
        expected == found,
        CompareAttribute::ValueGenerated,
        Some(&expected.to_string()),
        Some(&found.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ScalarType, ValueGenerated};
    use crate::compare::config::CompareConfig;
    use crate::compare::provider::SqlServerProvider;
    use crate::database::DatabaseModel;

    fn run(property: &PropertyDef, column: &ColumnDef) -> Vec<String> {
        let config = CompareConfig::default();
        let database = DatabaseModel::new();
        let ctx = CompareContext::new(&SqlServerProvider, &config, &database);
        let mut logs: Vec<CompareLog> = Vec::new();
        let mut logger = CompareLogger::new(&mut logs, CompareType::Property, &property.name);
        compare_property(&ctx, PropertyPair { property, column }, &mut logger);
        logs.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            rule_order(),
            vec![
                CompareAttribute::Nullability,
                CompareAttribute::ColumnName,
                CompareAttribute::ColumnType,
                CompareAttribute::DefaultValueSql,
                CompareAttribute::ComputedColumnSql,
                CompareAttribute::ValueGenerated,
            ]
        );
    }

    #[test]
    fn test_matching_property_is_ok() {
        let property = PropertyDef::optional("MyString", ScalarType::String);
        let column = ColumnDef::new("MyString", "nvarchar(max)").nullable();

        assert_eq!(run(&property, &column), vec!["OK: Property 'MyString'"]);
    }

    #[test]
    fn test_every_failing_rule_is_reported() {
        let property = PropertyDef::new("MyDateTime", ScalarType::DateTime);
        let column = ColumnDef::new("MyDateTime", "datetime")
            .nullable()
            .with_computed_sql("(getutcdate())");

        assert_eq!(
            run(&property, &column),
            vec![
                "DIFFERENT: Property 'MyDateTime', nullability. Expected = NOT NULL, found = NULL",
                "DIFFERENT: Property 'MyDateTime', column type. Expected = datetime2, found = datetime",
                "DIFFERENT: Property 'MyDateTime', computed column sql. Expected = <null>, found = getutcdate()",
                "DIFFERENT: Property 'MyDateTime', value generated. Expected = Never, found = OnAddOrUpdate",
            ]
        );
    }

    #[test]
    fn test_default_sql_is_normalized() {
        let property = PropertyDef::new("MyInt", ScalarType::Int32)
            .with_default_sql("123")
            .with_value_generated(ValueGenerated::OnAdd);
        let column = ColumnDef::new("MyInt", "int").with_default_sql("((123))");

        assert_eq!(run(&property, &column), vec!["OK: Property 'MyInt'"]);
    }

    #[test]
    fn test_property_not_found() {
        let property = PropertyDef::new("MyInt", ScalarType::Int32).with_column_name("OtherColName");
        let mut logs = Vec::new();
        property_not_found(&mut logs, &property);

        assert_eq!(
            logs[0].to_string(),
            "NOT IN DATABASE: Property 'MyInt', column name. Expected = OtherColName"
        );
    }
}
