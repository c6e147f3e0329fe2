//! Join alias resolution

use crate::core::constants::JOIN_DELIMITER;
use crate::query::QueryBuilder;

/// Alias of the join `entity_alias.field`, left joining it on first use
///
/// A new join is aliased with the field's own name. An existing join on the
/// same source expression is reused under whatever alias it has.
pub fn join_entity_alias<Q>(qb: &mut Q, entity_alias: &str, field: &str) -> String
where
    Q: QueryBuilder + ?Sized,
{
    let join_field = format!("{}.{}", entity_alias, field);

    if let Some(join) = qb.joins().iter().rev().find(|j| j.join == join_field) {
        tracing::trace!(join = %join_field, alias = %join.alias, "Reusing join");
        return join.alias.clone();
    }

    qb.left_join(&join_field, field);
    tracing::debug!(join = %join_field, alias = %field, "Registered left join");
    field.to_string()
}

/// Resolve a field path against `base_alias` into `(leaf_field, alias)`
///
/// `owner.name` joins `base_alias.owner` and yields `("name", "owner")`;
/// everything after the first dot is the leaf. Paths without a dot come back
/// unchanged with `base_alias`.
pub fn resolve_alias<Q>(qb: &mut Q, base_alias: &str, path: &str) -> (String, String)
where
    Q: QueryBuilder + ?Sized,
{
    match path.split_once(JOIN_DELIMITER) {
        Some((join_field, leaf)) => {
            let alias = join_entity_alias(qb, base_alias, join_field);
            (leaf.to_string(), alias)
        }
        None => (path.to_string(), base_alias.to_string()),
    }
}
