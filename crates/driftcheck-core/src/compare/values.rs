//! Small equivalence predicates and renderers shared by all comparators.

use serde::{Deserialize, Serialize};

/// Rendering of an absent value in diagnostics.
pub const NULL_TOKEN: &str = "<null>";

/// How identifiers (table, column, constraint names) are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NameComparison {
    /// Names must match exactly.
    #[default]
    CaseSensitive,
    /// Names match ignoring ASCII case.
    IgnoreCase,
}

impl NameComparison {
    /// Compare two names.
    pub fn eq(&self, a: &str, b: &str) -> bool {
        match self {
            NameComparison::CaseSensitive => a == b,
            NameComparison::IgnoreCase => a.eq_ignore_ascii_case(b),
        }
    }

    /// Compare two optional names; two absent names are equal.
    pub fn eq_opt(&self, a: Option<&str>, b: Option<&str>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => self.eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Compare two ordered name lists.
    pub fn lists_eq(&self, a: &[String], b: &[String]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(a, b)| self.eq(a, b))
    }

    /// Compare two name lists ignoring order. Repeated names must repeat equally often.
    pub fn sets_eq(&self, a: &[String], b: &[String]) -> bool {
        let count = |list: &[String], name: &str| list.iter().filter(|n| self.eq(n, name)).count();
        a.len() == b.len() && a.iter().all(|x| count(a, x) == count(b, x))
    }
}

/// Render an optional value, using [`NULL_TOKEN`] for absence.
pub fn render(value: Option<&str>) -> &str {
    value.unwrap_or(NULL_TOKEN)
}

/// Treat blank strings as absent.
pub fn normalize_null(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Normalize a SQL expression: trim it and strip redundant enclosing parentheses.
///
/// Databases report defaults and computed expressions wrapped in parentheses
/// (`((123))`, `(getutcdate())`) that the declared text does not carry.
pub fn normalize_sql(value: Option<&str>) -> Option<String> {
    let mut expr = normalize_null(value)?;
    while encloses_whole(expr) {
        expr = expr[1..expr.len() - 1].trim();
    }
    if expr.is_empty() {
        None
    } else {
        Some(expr.to_string())
    }
}

/// SQL expression equality after normalization.
pub fn sql_equal(a: Option<&str>, b: Option<&str>) -> bool {
    normalize_sql(a) == normalize_sql(b)
}

/// True if the first character is `(` and its matching `)` is the last character.
fn encloses_whole(expr: &str) -> bool {
    if !(expr.starts_with('(') && expr.ends_with(')')) {
        return false;
    }
    let last = expr.len() - 1;
    let mut depth = 0usize;
    let mut in_quote = false;
    for (i, ch) in expr.char_indices() {
        match ch {
            '\'' => in_quote = !in_quote,
            '(' if !in_quote => depth += 1,
            ')' if !in_quote => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i == last;
                }
            }
            _ => {}
        }
    }
    false
}

/// Render nullability the way SQL DDL spells it.
pub fn nullability(nullable: bool) -> &'static str {
    if nullable {
        "NULL"
    } else {
        "NOT NULL"
    }
}

/// Render index uniqueness.
pub fn uniqueness(unique: bool) -> &'static str {
    if unique {
        "UNIQUE"
    } else {
        "NOT UNIQUE"
    }
}

/// Render an ordered column list.
pub fn join_columns(columns: &[String]) -> String {
    columns.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_null() {
        assert_eq!(render(None), "<null>");
        assert_eq!(render(Some("123")), "123");
    }

    #[test]
    fn test_normalize_null_treats_blank_as_absent() {
        assert_eq!(normalize_null(Some("")), None);
        assert_eq!(normalize_null(Some("  ")), None);
        assert_eq!(normalize_null(Some(" abc ")), Some("abc"));
        assert_eq!(normalize_null(None), None);
    }

    #[test]
    fn test_normalize_sql_strips_redundant_brackets() {
        assert_eq!(normalize_sql(Some("((123))")).as_deref(), Some("123"));
        assert_eq!(
            normalize_sql(Some("(getutcdate())")).as_deref(),
            Some("getutcdate()")
        );
        assert_eq!(normalize_sql(Some(" ( ('x') ) ")).as_deref(), Some("'x'"));
        assert_eq!(normalize_sql(Some("()")), None);
        assert_eq!(normalize_sql(None), None);
    }

    #[test]
    fn test_normalize_sql_keeps_needed_brackets() {
        assert_eq!(
            normalize_sql(Some("(a) + (b)")).as_deref(),
            Some("(a) + (b)")
        );
        assert_eq!(
            normalize_sql(Some("getutcdate()")).as_deref(),
            Some("getutcdate()")
        );
        assert_eq!(normalize_sql(Some("(')')")).as_deref(), Some("')'"));
    }

    #[test]
    fn test_sql_equal() {
        assert!(sql_equal(Some("123"), Some("((123))")));
        assert!(!sql_equal(Some("123"), None));
        assert!(sql_equal(None, Some("")));
    }

    #[test]
    fn test_name_comparison() {
        assert!(NameComparison::CaseSensitive.eq("MyInt", "MyInt"));
        assert!(!NameComparison::CaseSensitive.eq("MyInt", "myint"));
        assert!(NameComparison::IgnoreCase.eq("MyInt", "myint"));
        assert!(NameComparison::IgnoreCase.eq_opt(Some("dbo"), Some("DBO")));
        assert!(!NameComparison::IgnoreCase.eq_opt(Some("dbo"), None));
    }

    #[test]
    fn test_list_comparison() {
        let ab = vec!["A".to_string(), "B".to_string()];
        let ba = vec!["B".to_string(), "A".to_string()];

        assert!(NameComparison::CaseSensitive.lists_eq(&ab, &ab));
        assert!(!NameComparison::CaseSensitive.lists_eq(&ab, &ba));
        assert!(NameComparison::CaseSensitive.sets_eq(&ab, &ba));
        assert!(!NameComparison::CaseSensitive.sets_eq(&ab, &ab[..1]));

        let aa = vec!["A".to_string(), "A".to_string()];
        assert!(!NameComparison::CaseSensitive.sets_eq(&aa, &ab));
        assert!(!NameComparison::CaseSensitive.sets_eq(&ab, &aa));
        let lower = vec!["b".to_string(), "a".to_string()];
        assert!(NameComparison::IgnoreCase.sets_eq(&ab, &lower));
    }

    #[test]
    fn test_renderers() {
        assert_eq!(nullability(false), "NOT NULL");
        assert_eq!(nullability(true), "NULL");
        assert_eq!(uniqueness(true), "UNIQUE");
        assert_eq!(join_columns(&["A".into(), "B".into()]), "A,B");
    }
}
