//! Predicate expressions
//!
//! Leaf predicates plus AND/OR composites. Rendering follows the usual
//! query-builder conventions:
//!
//! - a composite with a single part renders as that part
//! - parts of a multi-part composite are joined with ` AND ` / ` OR `
//! - a part is parenthesised when it is itself a multi-part composite, or
//!   when its text already contains ` AND ` / ` OR `

use std::fmt;

use crate::filters::FilterValue;
use crate::utils::sql::{contains_logical_operator, quote_literal};

/// A WHERE-clause predicate fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `left op right`, right side already rendered (placeholder or literal)
    Comparison {
        left: String,
        op: &'static str,
        right: String,
    },
    /// `column IN (v1, v2, ...)` with inlined literals
    In {
        column: String,
        values: Vec<FilterValue>,
    },
    /// `column BETWEEN low AND high`, bounds already rendered
    Between {
        column: String,
        low: String,
        high: String,
    },
    /// `column IS NULL` / `column IS NOT NULL`
    IsNull { column: String, negated: bool },
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

impl Expr {
    pub fn comparison(left: impl Into<String>, op: &'static str, right: impl Into<String>) -> Self {
        Self::Comparison {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self::IsNull {
            column: column.into(),
            negated: false,
        }
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::IsNull {
            column: column.into(),
            negated: true,
        }
    }

    pub fn and() -> Self {
        Self::And(Vec::new())
    }

    pub fn or() -> Self {
        Self::Or(Vec::new())
    }

    /// Add a part to a composite; empty composites are skipped
    ///
    /// Has no effect on leaf predicates.
    pub fn add(&mut self, part: Expr) {
        if part.is_empty() {
            return;
        }
        if let Self::And(parts) | Self::Or(parts) = self {
            parts.push(part);
        }
    }

    /// Number of parts of a composite (1 for leaves)
    pub fn count(&self) -> usize {
        match self {
            Self::And(parts) | Self::Or(parts) => parts.len(),
            _ => 1,
        }
    }

    /// An empty composite
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    fn render_part(part: &Expr) -> String {
        let sql = part.to_string();
        let nested = matches!(part, Self::And(_) | Self::Or(_)) && part.count() > 1;
        if nested || contains_logical_operator(&sql) {
            format!("({})", sql)
        } else {
            sql
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparison { left, op, right } => write!(f, "{} {} {}", left, op, right),
            Self::In { column, values } => {
                let literals: Vec<String> = values.iter().map(quote_literal).collect();
                write!(f, "{} IN ({})", column, literals.join(", "))
            }
            Self::Between { column, low, high } => {
                write!(f, "{} BETWEEN {} AND {}", column, low, high)
            }
            Self::IsNull { column, negated } => {
                if *negated {
                    write!(f, "{} IS NOT NULL", column)
                } else {
                    write!(f, "{} IS NULL", column)
                }
            }
            Self::And(parts) | Self::Or(parts) => {
                let separator = if matches!(self, Self::And(_)) {
                    " AND "
                } else {
                    " OR "
                };
                match parts.as_slice() {
                    [] => Ok(()),
                    [single] => write!(f, "{}", single),
                    _ => {
                        let rendered: Vec<String> = parts.iter().map(Self::render_part).collect();
                        f.write_str(&rendered.join(separator))
                    }
                }
            }
        }
    }
}
