//! Append-only writer for one element's diagnostics.

use super::log::{CompareAttribute, CompareLog, CompareState, CompareType};

/// Appends entries describing one element to a sibling list.
///
/// Loggers are short-lived: several of them (a property and the primary key,
/// say) take turns writing into the same entity's children, which keeps
/// emission order equal to check order.
pub struct CompareLogger<'a> {
    logs: &'a mut Vec<CompareLog>,
    kind: CompareType,
    name: &'a str,
}

impl<'a> CompareLogger<'a> {
    /// Bind a logger to `logs` for the element `kind '<name>'`.
    pub fn new(logs: &'a mut Vec<CompareLog>, kind: CompareType, name: &'a str) -> Self {
        Self { logs, kind, name }
    }

    fn push(
        &mut self,
        state: CompareState,
        attribute: CompareAttribute,
        expected: Option<String>,
        found: Option<String>,
    ) {
        self.logs.push(CompareLog::new(
            self.kind, state, self.name, attribute, expected, found,
        ));
    }

    /// Record that the element matched.
    pub fn mark_as_ok(&mut self) {
        self.logs.push(CompareLog::ok(self.kind, self.name));
    }

    /// Record a declared value with no database counterpart.
    pub fn not_in_database(&mut self, expected: impl Into<String>, attribute: CompareAttribute) {
        self.push(
            CompareState::NotInDatabase,
            attribute,
            Some(expected.into()),
            None,
        );
    }

    /// Record a database value with no declared counterpart.
    pub fn extra_in_database(&mut self, found: impl Into<String>, attribute: CompareAttribute) {
        self.push(
            CompareState::ExtraInDatabase,
            attribute,
            None,
            Some(found.into()),
        );
    }

    /// Record a `Different` entry unless `same`. Returns whether one was recorded.
    pub fn check_different(
        &mut self,
        same: bool,
        attribute: CompareAttribute,
        expected: Option<&str>,
        found: Option<&str>,
    ) -> bool {
        if same {
            return false;
        }
        self.push(
            CompareState::Different,
            attribute,
            expected.map(String::from),
            found.map(String::from),
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_different_only_logs_mismatch() {
        let mut logs = Vec::new();
        let mut logger = CompareLogger::new(&mut logs, CompareType::Property, "MyInt");

        assert!(!logger.check_different(
            true,
            CompareAttribute::ColumnType,
            Some("int"),
            Some("int")
        ));
        assert!(logger.check_different(
            false,
            CompareAttribute::DefaultValueSql,
            Some("123"),
            None
        ));

        assert_eq!(logs.len(), 1);
        assert_eq!(
            logs[0].to_string(),
            "DIFFERENT: Property 'MyInt', default value sql. Expected = 123, found = <null>"
        );
    }

    #[test]
    fn test_loggers_interleave_in_call_order() {
        let mut logs = Vec::new();
        CompareLogger::new(&mut logs, CompareType::Property, "MyInt")
            .not_in_database("OtherColName", CompareAttribute::ColumnName);
        CompareLogger::new(&mut logs, CompareType::PrimaryKey, "PK_MyEntities")
            .not_in_database("MyInt", CompareAttribute::ColumnName);
        CompareLogger::new(&mut logs, CompareType::Column, "Legacy")
            .extra_in_database("Legacy", CompareAttribute::ColumnName);
        CompareLogger::new(&mut logs, CompareType::Property, "MyString").mark_as_ok();

        let kinds: Vec<_> = logs.iter().map(|l| (l.kind, l.state)).collect();
        assert_eq!(
            kinds,
            vec![
                (CompareType::Property, CompareState::NotInDatabase),
                (CompareType::PrimaryKey, CompareState::NotInDatabase),
                (CompareType::Column, CompareState::ExtraInDatabase),
                (CompareType::Property, CompareState::Ok),
            ]
        );
        assert_eq!(logs[2].found.as_deref(), Some("Legacy"));
    }
}
