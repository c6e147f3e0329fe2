//! SQL utility functions

use crate::filters::FilterValue;

/// Escape SQL LIKE metacharacters (%, _, \) in user input
///
/// # Example
///
/// ```
/// use query_filters::utils::sql::escape_like_pattern;
///
/// let user_input = "100% match_test";
/// let pattern = format!("%{}%", escape_like_pattern(user_input));
/// assert_eq!(pattern, "%100\\% match\\_test%");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Render a value as a SQL literal
///
/// Numbers and booleans are inlined, everything else is single quoted with
/// embedded quotes doubled.
pub fn quote_literal(value: &FilterValue) -> String {
    match value {
        FilterValue::Int(_) | FilterValue::Float(_) | FilterValue::Bool(_) => value.to_string(),
        other => format!("'{}'", other.to_string().replace('\'', "''")),
    }
}

/// Whether a rendered fragment needs parentheses when joined with others
pub(crate) fn contains_logical_operator(sql: &str) -> bool {
    let upper = sql.to_ascii_uppercase();
    upper.contains(" OR ") || upper.contains(" AND ")
}
