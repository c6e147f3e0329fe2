//! Query-builder abstraction
//!
//! The filter compiler never builds SQL by itself. It talks to a builder
//! through the [`QueryBuilder`] trait: alias introspection, join registration,
//! WHERE composition, named parameters and ORDER BY terms.
//!
//! [`SelectQuery`] is a self-contained implementation rendering DQL-like text.

mod expr;
mod select;

use std::fmt;

use crate::filters::FilterValue;

pub use expr::Expr;
pub use select::SelectQuery;

/// Join type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

impl JoinKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
        }
    }
}

/// A registered join: `join` is the source expression (`t.owner`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub kind: JoinKind,
    pub join: String,
    pub alias: String,
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind.as_str(), self.join, self.alias)
    }
}

/// A named bind parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: FilterValue,
}

/// Mutable query-builder handle the filter compiler works against
///
/// Implementations are used single-threaded: one compiler call at a time per
/// builder.
pub trait QueryBuilder {
    /// All aliases, root aliases first (index 0 is the default target)
    fn aliases(&self) -> Vec<String>;

    /// Registered joins in registration order
    fn joins(&self) -> &[Join];

    /// Register a LEFT join of `join` under `alias`
    fn left_join(&mut self, join: &str, alias: &str);

    /// Append a predicate to the WHERE tree with AND
    fn and_where(&mut self, expr: Expr);

    /// Append a predicate to the WHERE tree with OR
    fn or_where(&mut self, expr: Expr);

    /// Bind a named parameter, replacing an existing one with the same name
    fn set_parameter(&mut self, name: &str, value: FilterValue);

    /// Append an ORDER BY term; `order` is used verbatim
    fn add_order_by(&mut self, sort: &str, order: &str);

    /// Default alias for unqualified fields
    fn root_alias(&self) -> Option<String> {
        self.aliases().into_iter().next()
    }
}
