//! Filter compilation
//!
//! Translates filter keys and sort keys into predicates, joins and ORDER BY
//! terms on a [`QueryBuilder`].
//!
//! | key                | predicate                         |
//! |--------------------|-----------------------------------|
//! | `f`                | `t.f = :param`                    |
//! | `f__like`          | `t.f LIKE :param` (`%value%`)     |
//! | `f__in`            | `t.f IN ('a', 'b')`               |
//! | `f__between`       | `t.f BETWEEN low AND high`        |
//! | `f__lt` ... `__gte`| `t.f < value` ...                 |
//! | `f__null`          | `t.f IS NULL` / `IS NOT NULL`     |
//! | `f__is`            | `null`/`"null"`/`"not_null"`      |

mod compiler;
mod form;
mod join;
mod parser;
mod sort;
mod tokenizer;
mod types;

use crate::error::Result;
use crate::query::QueryBuilder;

pub use compiler::FilterCompiler;
pub use form::{FilterForm, FormRegistry, StaticFilterForm};
pub use join::{join_entity_alias, resolve_alias};
pub use parser::{parse_filters, parse_order_by};
pub use sort::sort_by;
pub use tokenizer::{split_field_name, split_or_fields};
pub use types::{CombinationMode, FilterSet, FilterValue, Operator, OrderBy, ParseModeError};

/// Apply filters with the default configuration
pub fn apply<'q, Q>(qb: &'q mut Q, filters: &FilterSet, mode: CombinationMode) -> Result<&'q mut Q>
where
    Q: QueryBuilder + ?Sized,
{
    FilterCompiler::default().apply(qb, filters, mode)
}
