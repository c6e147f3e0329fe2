//! Query filters
//!
//! Turns a flat mapping of filter keys into predicates on a query builder.
//!
//! ## Filter key grammar
//!
//! - `name` - equality, bound as a named parameter
//! - `name__like` - operator suffix after a double underscore
//! - `owner.name__like` - dotted path, left joins `owner` off the root alias
//! - `name__like___or___surname__like` - OR-group, members combined with OR
//!
//! Operators: `like`, `in`, `between`, `lt`, `lte`, `gt`, `gte`, `null`, `is`.
//!
//! ## Usage
//!
//! ```
//! use query_filters::{CombinationMode, FilterSet, SelectQuery, filters};
//!
//! let mut qb = SelectQuery::new().select("t").from("test", "t");
//! let mut set = FilterSet::new();
//! set.insert("name__like", "test");
//! set.insert("age__gte", 18);
//!
//! filters::apply(&mut qb, &set, CombinationMode::And).unwrap();
//! assert_eq!(
//!     qb.to_dql_inlined(),
//!     r#"SELECT t FROM test t WHERE t.name LIKE "%test%" AND t.age >= 18"#
//! );
//! ```

pub mod core;
pub mod error;
pub mod filters;
pub mod query;
pub mod utils;

pub use crate::core::config::FiltersConfig;
pub use error::{FilterError, Result};
pub use filters::{
    CombinationMode, FilterCompiler, FilterForm, FilterSet, FilterValue, FormRegistry, Operator,
    OrderBy, StaticFilterForm,
};
pub use query::{Expr, Join, JoinKind, Parameter, QueryBuilder, SelectQuery};
