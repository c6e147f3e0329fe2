//! Filter parsing
//!
//! Parses JSON filter objects into ordered filter and sort mappings.

use serde_json::{Map, Value};

use crate::core::config::FiltersConfig;
use crate::error::{FilterError, Result};

use super::types::{FilterSet, FilterValue, OrderBy};

/// Parse a JSON object of `key: value` filters
///
/// Validates input size and entry count; key order is preserved.
pub fn parse_filters(json_str: &str, config: &FiltersConfig) -> Result<FilterSet> {
    let object = parse_object(json_str, config)?;

    object
        .into_iter()
        .map(|(key, value)| {
            FilterValue::try_from(value)
                .map(|value| (key.clone(), value))
                .map_err(|e| FilterError::InvalidFilterJson(format!("{}: {}", key, e)))
        })
        .collect()
}

/// Parse a JSON object of `key: "direction"` sort terms
pub fn parse_order_by(json_str: &str, config: &FiltersConfig) -> Result<OrderBy> {
    let object = parse_object(json_str, config)?;

    object
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(direction) => Ok((key, direction)),
            other => Err(FilterError::InvalidFilterJson(format!(
                "{}: sort direction must be a string, got {}",
                key, other
            ))),
        })
        .collect()
}

fn parse_object(json_str: &str, config: &FiltersConfig) -> Result<Map<String, Value>> {
    if json_str.len() > config.max_filter_json_bytes {
        return Err(FilterError::FilterJsonTooLarge {
            max: config.max_filter_json_bytes,
        });
    }

    let object: Map<String, Value> = serde_json::from_str(json_str)
        .map_err(|e| FilterError::InvalidFilterJson(e.to_string()))?;

    if object.len() > config.max_filters {
        return Err(FilterError::TooManyFilters {
            max: config.max_filters,
        });
    }

    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_filters_valid_json() {
        let json = r#"{"name__like": "test", "status__in": ["1", "2"], "age__is": null}"#;
        let filters = parse_filters(json, &FiltersConfig::default()).unwrap();

        assert_eq!(filters.len(), 3);
        let keys: Vec<&str> = filters.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name__like", "status__in", "age__is"]);
        assert_eq!(filters.get("age__is"), Some(&FilterValue::Null));
    }

    #[test]
    fn parse_filters_keeps_document_order() {
        let json = r#"{"z": 1, "a": 2, "m": 3}"#;
        let filters = parse_filters(json, &FiltersConfig::default()).unwrap();
        let keys: Vec<&str> = filters.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn parse_filters_invalid_json() {
        let err = parse_filters("not valid json", &FiltersConfig::default()).unwrap_err();
        assert_eq!(err.code(), "INVALID_FILTER_JSON");
    }

    #[test]
    fn parse_filters_rejects_non_object() {
        assert!(parse_filters(r#"["a"]"#, &FiltersConfig::default()).is_err());
    }

    #[test]
    fn parse_filters_rejects_object_values() {
        let err = parse_filters(r#"{"a": {"b": 1}}"#, &FiltersConfig::default()).unwrap_err();
        assert!(err.to_string().contains("a: objects are not valid filter values"));
    }

    #[test]
    fn parse_filters_too_large() {
        let config = FiltersConfig {
            max_filter_json_bytes: 10,
            ..Default::default()
        };
        let err = parse_filters(r#"{"name__like": "test"}"#, &config).unwrap_err();
        assert_eq!(err, FilterError::FilterJsonTooLarge { max: 10 });
    }

    #[test]
    fn parse_filters_too_many() {
        let config = FiltersConfig {
            max_filters: 1,
            ..Default::default()
        };
        let err = parse_filters(r#"{"a": 1, "b": 2}"#, &config).unwrap_err();
        assert_eq!(err, FilterError::TooManyFilters { max: 1 });
    }

    #[test]
    fn parse_order_by_valid() {
        let order = parse_order_by(r#"{"owner.name": "asc", "age": "desc"}"#, &FiltersConfig::default())
            .unwrap();
        let entries: Vec<(&str, &str)> = order.iter().collect();
        assert_eq!(entries, vec![("owner.name", "asc"), ("age", "desc")]);
    }

    #[test]
    fn parse_order_by_rejects_non_string_direction() {
        assert!(parse_order_by(r#"{"age": 1}"#, &FiltersConfig::default()).is_err());
    }
}
