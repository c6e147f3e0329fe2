//! ORDER BY compilation

use crate::error::{FilterError, Result};
use crate::query::QueryBuilder;

use super::join::resolve_alias;
use super::types::OrderBy;

/// Append one ORDER BY term per sort key, in order
///
/// Plain keys are qualified with the root alias, dotted keys with their join
/// alias. Directions are passed through unchecked.
pub fn sort_by<'q, Q>(qb: &'q mut Q, order_by: &OrderBy) -> Result<&'q mut Q>
where
    Q: QueryBuilder + ?Sized,
{
    if order_by.is_empty() {
        return Ok(qb);
    }

    let root = qb.root_alias().ok_or(FilterError::MissingQuerySource)?;
    for (key, direction) in order_by.iter() {
        let (field, alias) = resolve_alias(qb, &root, key);
        qb.add_order_by(&format!("{}.{}", alias, field), direction);
    }

    tracing::debug!(terms = order_by.len(), "Applied ordering");
    Ok(qb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SelectQuery;

    fn base() -> SelectQuery {
        SelectQuery::new().select("t").from("test", "t")
    }

    #[test]
    fn plain_key() {
        let mut qb = base();
        let order: OrderBy = [("field", "asc")].into_iter().collect();
        sort_by(&mut qb, &order).unwrap();
        assert_eq!(qb.to_dql(), "SELECT t FROM test t ORDER BY t.field asc");
    }

    #[test]
    fn dotted_key_joins_once() {
        let mut qb = base();
        let order: OrderBy = [("owner.name", "desc"), ("owner.age", "asc")]
            .into_iter()
            .collect();
        sort_by(&mut qb, &order).unwrap();
        assert_eq!(
            qb.to_dql(),
            "SELECT t FROM test t LEFT JOIN t.owner owner ORDER BY owner.name desc, owner.age asc"
        );
    }

    #[test]
    fn plain_key_after_dotted_key_uses_root_alias() {
        let mut qb = base();
        let order: OrderBy = [("owner.name", "asc"), ("created", "desc")]
            .into_iter()
            .collect();
        sort_by(&mut qb, &order).unwrap();
        assert_eq!(
            qb.order_by_terms(),
            ["owner.name asc", "t.created desc"]
        );
    }

    #[test]
    fn direction_passes_through() {
        let mut qb = base();
        let order: OrderBy = [("field", "DESC NULLS LAST")].into_iter().collect();
        sort_by(&mut qb, &order).unwrap();
        assert_eq!(qb.order_by_terms(), ["t.field DESC NULLS LAST"]);
    }

    #[test]
    fn missing_source() {
        let mut qb = SelectQuery::new();
        let order: OrderBy = [("field", "asc")].into_iter().collect();
        assert_eq!(
            sort_by(&mut qb, &order).unwrap_err(),
            FilterError::MissingQuerySource
        );
    }

    #[test]
    fn empty_order_is_noop_without_source() {
        let mut qb = SelectQuery::new();
        assert!(sort_by(&mut qb, &OrderBy::new()).is_ok());
        assert!(qb.order_by_terms().is_empty());
    }
}
