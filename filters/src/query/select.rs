//! DQL-style select builder

use super::{Expr, Join, JoinKind, Parameter, QueryBuilder};
use crate::filters::FilterValue;

#[derive(Debug, Clone, PartialEq, Eq)]
struct FromClause {
    entity: String,
    alias: String,
}

/// In-memory select builder rendering DQL-like text
///
/// ```
/// use query_filters::{QueryBuilder, SelectQuery};
///
/// let mut qb = SelectQuery::new().select("t").from("test", "t");
/// qb.add_order_by("t.field", "asc");
/// assert_eq!(qb.to_dql(), "SELECT t FROM test t ORDER BY t.field asc");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    select: Vec<String>,
    from: Vec<FromClause>,
    joins: Vec<Join>,
    where_expr: Option<Expr>,
    parameters: Vec<Parameter>,
    order_by: Vec<String>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a select expression
    pub fn select(mut self, expr: impl Into<String>) -> Self {
        self.select.push(expr.into());
        self
    }

    /// Add a root entity under `alias`
    pub fn from(mut self, entity: impl Into<String>, alias: impl Into<String>) -> Self {
        self.from.push(FromClause {
            entity: entity.into(),
            alias: alias.into(),
        });
        self
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&FilterValue> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    pub fn where_expr(&self) -> Option<&Expr> {
        self.where_expr.as_ref()
    }

    pub fn order_by_terms(&self) -> &[String] {
        &self.order_by
    }

    /// Render the query with `:name` placeholders
    pub fn to_dql(&self) -> String {
        let mut dql = String::from("SELECT ");
        if self.select.is_empty() {
            let aliases: Vec<&str> = self.from.iter().map(|f| f.alias.as_str()).collect();
            dql.push_str(&aliases.join(", "));
        } else {
            dql.push_str(&self.select.join(", "));
        }

        if !self.from.is_empty() {
            let from: Vec<String> = self
                .from
                .iter()
                .enumerate()
                .map(|(i, f)| {
                    let mut part = format!("{} {}", f.entity, f.alias);
                    for join in self.joins.iter().filter(|j| self.join_root(j) == i) {
                        part.push(' ');
                        part.push_str(&join.to_string());
                    }
                    part
                })
                .collect();
            dql.push_str(" FROM ");
            dql.push_str(&from.join(", "));
        }

        if let Some(expr) = self.where_expr.as_ref().filter(|e| !e.is_empty()) {
            dql.push_str(" WHERE ");
            dql.push_str(&expr.to_string());
        }

        if !self.order_by.is_empty() {
            dql.push_str(" ORDER BY ");
            dql.push_str(&self.order_by.join(", "));
        }

        dql
    }

    /// Render the query with every bound parameter substituted as `"value"`
    pub fn to_dql_inlined(&self) -> String {
        let mut dql = self.to_dql();
        // Longest names first so no name clobbers another it prefixes
        let mut params: Vec<&Parameter> = self.parameters.iter().collect();
        params.sort_by_key(|p| std::cmp::Reverse(p.name.len()));
        for param in params {
            dql = dql.replace(&format!(":{}", param.name), &format!("\"{}\"", param.value));
        }
        dql
    }

    /// Index of the root entity a join hangs off (first root when unknown)
    fn join_root(&self, join: &Join) -> usize {
        let source = join.join.split('.').next().unwrap_or_default();
        let mut alias = source;
        // Follow join chains (`owner.company`) back to a root alias
        for _ in 0..self.joins.len() {
            let Some(parent) = self.joins.iter().find(|j| j.alias == alias) else {
                break;
            };
            alias = parent.join.split('.').next().unwrap_or_default();
        }
        self.from
            .iter()
            .position(|f| f.alias == alias)
            .unwrap_or_default()
    }
}

impl QueryBuilder for SelectQuery {
    fn aliases(&self) -> Vec<String> {
        self.from
            .iter()
            .map(|f| f.alias.clone())
            .chain(self.joins.iter().map(|j| j.alias.clone()))
            .collect()
    }

    fn joins(&self) -> &[Join] {
        &self.joins
    }

    fn left_join(&mut self, join: &str, alias: &str) {
        self.joins.push(Join {
            kind: JoinKind::Left,
            join: join.to_string(),
            alias: alias.to_string(),
        });
    }

    fn and_where(&mut self, expr: Expr) {
        match self.where_expr.take() {
            Some(mut root @ Expr::And(_)) => {
                root.add(expr);
                self.where_expr = Some(root);
            }
            previous => {
                let mut root = Expr::and();
                if let Some(previous) = previous {
                    root.add(previous);
                }
                root.add(expr);
                self.where_expr = Some(root);
            }
        }
    }

    fn or_where(&mut self, expr: Expr) {
        match self.where_expr.take() {
            Some(mut root @ Expr::Or(_)) => {
                root.add(expr);
                self.where_expr = Some(root);
            }
            previous => {
                let mut root = Expr::or();
                if let Some(previous) = previous {
                    root.add(previous);
                }
                root.add(expr);
                self.where_expr = Some(root);
            }
        }
    }

    fn set_parameter(&mut self, name: &str, value: FilterValue) {
        match self.parameters.iter_mut().find(|p| p.name == name) {
            Some(param) => param.value = value,
            None => self.parameters.push(Parameter {
                name: name.to_string(),
                value,
            }),
        }
    }

    fn add_order_by(&mut self, sort: &str, order: &str) {
        self.order_by.push(format!("{} {}", sort, order));
    }
}
