use std::collections::HashSet;

use tracing::debug;

use crate::{CollectionDefinition, MembershipDelta, MembershipEntry, ProductFacts};

/// Ids of the collections `product` currently belongs to by rule.
///
/// Only published automatic collections with a rule set take part. Nothing is
/// persisted; this is the single-product preview path.
#[must_use]
pub fn resolve_collection_membership<'a>(
    collections: &'a [CollectionDefinition],
    product: &ProductFacts,
) -> Vec<&'a str> {
    collections
        .iter()
        .filter(|c| collection_matches(c, product))
        .map(|c| c.id.as_str())
        .collect()
}

/// Compute the membership changes a catalog reindex of `collection` requires.
///
/// `products` is the shop's catalog and `current` the collection's stored
/// membership. Active products matching the rules and not yet members are
/// added after the highest retained position, in catalog order. Members that
/// no longer match, or that are no longer active, are removed.
///
/// Collections that are not rule-driven, or have no rule set, are left
/// untouched and produce an empty delta.
pub fn resolve_membership_delta(
    collection: &CollectionDefinition,
    products: &[ProductFacts],
    current: &[MembershipEntry],
) -> MembershipDelta {
    let Some(rules) = collection.rules.as_ref().filter(|_| collection.is_rule_driven()) else {
        debug!(collection = %collection.id, "collection is not rule-driven, skipping reindex");
        return MembershipDelta::default();
    };

    let matching: Vec<&ProductFacts> = products
        .iter()
        .filter(|p| p.is_active() && rules.matches(p))
        .collect();
    let matching_ids: HashSet<&str> = matching.iter().map(|p| p.id()).collect();

    let mut removals = Vec::new();
    let mut removed = HashSet::new();
    let mut retained = HashSet::new();
    let mut next_position = 0;
    for entry in current {
        if matching_ids.contains(entry.product_id.as_str()) {
            retained.insert(entry.product_id.as_str());
            next_position = next_position.max(entry.position.saturating_add(1));
        } else if removed.insert(entry.product_id.as_str()) {
            removals.push(entry.product_id.clone());
        }
    }

    let mut additions = Vec::new();
    for product in matching {
        if retained.insert(product.id()) {
            additions.push(MembershipEntry::new(product.id(), next_position));
            next_position = next_position.saturating_add(1);
        }
    }

    let delta = MembershipDelta {
        additions,
        removals,
    };
    debug!(
        collection = %collection.id,
        added = delta.added(),
        removed = delta.removed(),
        "computed membership delta"
    );
    delta
}

fn collection_matches(collection: &CollectionDefinition, product: &ProductFacts) -> bool {
    collection.is_rule_driven()
        && collection
            .rules
            .as_ref()
            .is_some_and(|rules| rules.matches(product))
}
