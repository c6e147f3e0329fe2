//! Filter expression compiler
//!
//! Compiles `(key, value)` filter entries into predicates on a query builder.

use crate::core::config::FiltersConfig;
use crate::core::constants::JOIN_DELIMITER;
use crate::error::{FilterError, Result};
use crate::query::{Expr, QueryBuilder};
use crate::utils::hash::short_md5;
use crate::utils::sql::escape_like_pattern;

use super::join::resolve_alias;
use super::tokenizer::{split_field_name, split_or_fields};
use super::types::{CombinationMode, FilterSet, FilterValue, Operator};

/// Stateless filter compiler carrying its configuration
#[derive(Debug, Clone, Default)]
pub struct FilterCompiler {
    config: FiltersConfig,
}

impl FilterCompiler {
    pub fn new(config: FiltersConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FiltersConfig {
        &self.config
    }

    /// Apply every filter entry, in order, combining entries with `mode`
    ///
    /// Each entry contributes exactly one top-level clause. On error, clauses
    /// and parameters from earlier entries stay applied.
    pub fn apply<'q, Q>(
        &self,
        qb: &'q mut Q,
        filters: &FilterSet,
        mode: CombinationMode,
    ) -> Result<&'q mut Q>
    where
        Q: QueryBuilder + ?Sized,
    {
        tracing::debug!(filters = filters.len(), mode = %mode, "Applying filters");

        for (key, value) in filters.iter() {
            let expr = self.compile_filter(qb, key, value)?;
            match mode {
                CombinationMode::And => qb.and_where(expr),
                CombinationMode::Or => qb.or_where(expr),
            }
        }

        Ok(qb)
    }

    /// Apply filters with the configured combination mode
    pub fn apply_default<'q, Q>(&self, qb: &'q mut Q, filters: &FilterSet) -> Result<&'q mut Q>
    where
        Q: QueryBuilder + ?Sized,
    {
        self.apply(qb, filters, self.config.mode)
    }

    /// Compile one filter entry into an OR composite of its group members
    pub fn compile_filter<Q>(&self, qb: &mut Q, key: &str, value: &FilterValue) -> Result<Expr>
    where
        Q: QueryBuilder + ?Sized,
    {
        let mut group = Expr::or();
        for field in split_or_fields(key) {
            group.add(self.build_field_expression(qb, field, value)?);
        }
        Ok(group)
    }

    /// Compile a single `field[__operator]` key
    fn build_field_expression<Q>(&self, qb: &mut Q, field: &str, value: &FilterValue) -> Result<Expr>
    where
        Q: QueryBuilder + ?Sized,
    {
        let (path, suffix) = split_field_name(field);
        let root = qb.root_alias().ok_or(FilterError::MissingQuerySource)?;
        let dotted = path.contains(JOIN_DELIMITER);
        let (leaf, alias) = resolve_alias(qb, &root, path);

        let operator = suffix.and_then(Operator::from_suffix);
        tracing::trace!(
            field,
            alias = %alias,
            leaf = %leaf,
            operator = ?operator,
            "Compiling filter field"
        );

        let column = format!("{}.{}", alias, leaf);
        let parameter = self.parameter_name(field);

        if let Some(op) = operator
            && let Some(symbol) = op.comparison_symbol()
        {
            require_scalar(value, op.as_str())?;
            let right = match value.format_date() {
                Some(date) => format!("\"{}\"", date),
                None => value.to_string(),
            };
            return Ok(Expr::comparison(column, symbol, right));
        }

        match operator {
            Some(Operator::Like) => {
                require_scalar(value, "like")?;
                let text = value.to_string();
                let text = if self.config.escape_like {
                    escape_like_pattern(&text)
                } else {
                    text
                };
                qb.set_parameter(&parameter, FilterValue::String(format!("%{}%", text)));
                Ok(Expr::comparison(column, "LIKE", format!(":{}", parameter)))
            }
            Some(Operator::In) => {
                let values = match value {
                    FilterValue::List(items) => items.clone(),
                    other => vec![other.clone()],
                };
                Ok(Expr::In { column, values })
            }
            Some(Operator::Between) => match value {
                FilterValue::List(bounds) if bounds.len() == 2 => Ok(Expr::Between {
                    column,
                    low: between_bound(&bounds[0]),
                    high: between_bound(&bounds[1]),
                }),
                _ => Err(FilterError::shape("between", "a two-element list")),
            },
            Some(Operator::Null) => {
                if value.is_truthy() {
                    Ok(Expr::is_null(column))
                } else {
                    Ok(Expr::is_not_null(column))
                }
            }
            Some(Operator::Is) => match value {
                FilterValue::Null => Ok(Expr::is_null(column)),
                FilterValue::String(s) if s == "null" => Ok(Expr::is_null(column)),
                FilterValue::String(s) if s == "not_null" => Ok(Expr::is_not_null(column)),
                other => Err(FilterError::invalid_value(other.to_string())),
            },
            // Comparison operators returned above; `None` also covers an
            // unrecognised two-piece suffix, compiled as equality
            _ => {
                require_scalar(value, "=")?;
                // Without a join the condition targets the whole key, suffix included
                let column = if dotted {
                    column
                } else {
                    format!("{}.{}", alias, field)
                };
                qb.set_parameter(&parameter, value.clone());
                Ok(Expr::comparison(column, "=", format!(":{}", parameter)))
            }
        }
    }

    /// Bind parameter name: prefix plus a truncated md5 of the field key
    ///
    /// Distinct keys may collide once truncated; such keys would share one
    /// parameter.
    fn parameter_name(&self, field: &str) -> String {
        format!(
            "{}{}",
            self.config.parameter_prefix,
            short_md5(field, self.config.parameter_hash_len)
        )
    }
}

fn require_scalar(value: &FilterValue, operator: &'static str) -> Result<()> {
    if value.is_list() {
        return Err(FilterError::shape(operator, "a scalar value"));
    }
    Ok(())
}

/// Dates as `YYYY-MM-DD`, then anything non-numeric double quoted
fn between_bound(value: &FilterValue) -> String {
    match value.format_date() {
        Some(date) => format!("\"{}\"", date),
        None if value.is_numeric() => value.to_string(),
        None => format!("\"{}\"", value),
    }
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
