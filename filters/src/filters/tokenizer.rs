//! Filter key tokenizer
//!
//! Splits OR-groups and separates field paths from operator suffixes.

use crate::core::constants::{OPERATOR_DELIMITER, OR_DELIMITER};

use super::types::Operator;

/// Split an OR-group key into its member keys (`[key]` when there is no group)
pub fn split_or_fields(key: &str) -> Vec<&str> {
    key.split(OR_DELIMITER).collect()
}

/// Split a key into `(field_path, operator_suffix)`
///
/// - one piece: the whole key, no suffix
/// - two pieces: the second piece is the suffix, whatever it says
/// - three or more: the last piece is the suffix only when it is a known
///   operator, otherwise the whole key is the field path
pub fn split_field_name(key: &str) -> (&str, Option<&str>) {
    let pieces: Vec<&str> = key.split(OPERATOR_DELIMITER).collect();

    match pieces.as_slice() {
        [field] => (*field, None),
        [field, suffix] => (*field, Some(*suffix)),
        [.., last] => {
            if Operator::from_suffix(last).is_some() {
                let path_len = key.len() - last.len() - OPERATOR_DELIMITER.len();
                (&key[..path_len], Some(*last))
            } else {
                (key, None)
            }
        }
        [] => (key, None),
    }
}
