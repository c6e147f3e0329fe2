//! Filter error types

use thiserror::Error;

/// Errors raised while compiling filters into a query builder
///
/// Nothing is rolled back on error: predicates and parameters applied by
/// earlier entries stay on the builder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// The builder has no root alias to qualify fields with
    #[error("Before running Filters apply you must add a from")]
    MissingQuerySource,

    /// Value not accepted by the `is` operator
    #[error(
        "Invalid is filter value {value}, must be \"null\", null or \"not_null\", no other case is yet implemented"
    )]
    InvalidFilterValue { value: String },

    /// Value shape does not match what the operator needs
    #[error("Filter operator {operator} expects {expected}")]
    InvalidValueShape {
        operator: &'static str,
        expected: &'static str,
    },

    /// No filter form registered under the requested name
    #[error("Filter form {name} is not registered as a FilterForm")]
    InvalidFilterForm { name: String },

    /// Filter JSON input exceeds the configured size
    #[error("Filter JSON exceeds maximum size of {max} bytes")]
    FilterJsonTooLarge { max: usize },

    /// Filter JSON input has more entries than allowed
    #[error("Maximum {max} filters allowed")]
    TooManyFilters { max: usize },

    /// Filter JSON input could not be parsed
    #[error("Invalid filter JSON: {0}")]
    InvalidFilterJson(String),
}

impl FilterError {
    /// Create an invalid `is` value error
    pub fn invalid_value(value: impl Into<String>) -> Self {
        Self::InvalidFilterValue {
            value: value.into(),
        }
    }

    /// Create a value shape error
    pub fn shape(operator: &'static str, expected: &'static str) -> Self {
        Self::InvalidValueShape { operator, expected }
    }

    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingQuerySource => "MISSING_QUERY_SOURCE",
            Self::InvalidFilterValue { .. } => "INVALID_FILTER_VALUE",
            Self::InvalidValueShape { .. } => "INVALID_VALUE_SHAPE",
            Self::InvalidFilterForm { .. } => "INVALID_FILTER_FORM",
            Self::FilterJsonTooLarge { .. } => "FILTER_JSON_TOO_LARGE",
            Self::TooManyFilters { .. } => "TOO_MANY_FILTERS",
            Self::InvalidFilterJson(_) => "INVALID_FILTER_JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_query_source_display() {
        assert_eq!(
            FilterError::MissingQuerySource.to_string(),
            "Before running Filters apply you must add a from"
        );
    }

    #[test]
    fn test_invalid_value_names_offending_value() {
        let err = FilterError::invalid_value("failed");
        assert!(err.to_string().contains("failed"));
        assert_eq!(err.code(), "INVALID_FILTER_VALUE");
    }

    #[test]
    fn test_shape_error_display() {
        let err = FilterError::shape("between", "a two-element list");
        assert_eq!(
            err.to_string(),
            "Filter operator between expects a two-element list"
        );
    }

    #[test]
    fn test_codes() {
        assert_eq!(FilterError::MissingQuerySource.code(), "MISSING_QUERY_SOURCE");
        assert_eq!(
            FilterError::TooManyFilters { max: 50 }.code(),
            "TOO_MANY_FILTERS"
        );
        assert_eq!(
            FilterError::InvalidFilterJson("eof".into()).code(),
            "INVALID_FILTER_JSON"
        );
    }
}
