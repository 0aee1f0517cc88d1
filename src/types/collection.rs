use serde::{Deserialize, Serialize};

use super::ruleset::RuleSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionKind {
    /// Membership is curated by hand.
    #[default]
    Manual,
    /// Membership is derived from the collection's rule set.
    Automatic,
}

/// A storefront collection as seen by the membership resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDefinition {
    pub id: String,
    pub shop_id: String,
    #[serde(rename = "type", default)]
    pub kind: CollectionKind,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub rules: Option<RuleSet>,
}

impl CollectionDefinition {
    /// A published, automatic collection driven by `rules`.
    #[must_use]
    pub fn automatic(id: impl Into<String>, shop_id: impl Into<String>, rules: RuleSet) -> Self {
        Self {
            id: id.into(),
            shop_id: shop_id.into(),
            kind: CollectionKind::Automatic,
            is_published: true,
            rules: Some(rules),
        }
    }

    /// A published, hand-curated collection.
    #[must_use]
    pub fn manual(id: impl Into<String>, shop_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            shop_id: shop_id.into(),
            kind: CollectionKind::Manual,
            is_published: true,
            rules: None,
        }
    }

    #[must_use]
    pub fn unpublished(mut self) -> Self {
        self.is_published = false;
        self
    }

    /// Only published automatic collections take part in rule-based membership.
    #[must_use]
    pub fn is_rule_driven(&self) -> bool {
        self.is_published && self.kind == CollectionKind::Automatic
    }
}

/// One product's slot in a collection, as persisted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipEntry {
    pub product_id: String,
    pub position: u32,
}

impl MembershipEntry {
    #[must_use]
    pub fn new(product_id: impl Into<String>, position: u32) -> Self {
        Self {
            product_id: product_id.into(),
            position,
        }
    }
}

/// Changes needed to bring a collection's stored membership in line with its rules.
///
/// Callers should persist the whole delta in one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct MembershipDelta {
    /// New members with the positions they should be stored at.
    pub additions: Vec<MembershipEntry>,
    /// Product ids whose membership should be removed.
    pub removals: Vec<String>,
}

impl MembershipDelta {
    #[must_use]
    pub fn added(&self) -> usize {
        self.additions.len()
    }

    #[must_use]
    pub fn removed(&self) -> usize {
        self.removals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_driven_requires_published_automatic() {
        let auto = CollectionDefinition::automatic("c", "s", RuleSet::all());
        assert!(auto.is_rule_driven());
        assert!(!auto.clone().unpublished().is_rule_driven());
        assert!(!CollectionDefinition::manual("c", "s").is_rule_driven());
    }

    #[test]
    fn delta_counts() {
        let delta = MembershipDelta {
            additions: vec![MembershipEntry::new("p-1", 3)],
            removals: vec!["p-2".into(), "p-3".into()],
        };
        assert_eq!(delta.added(), 1);
        assert_eq!(delta.removed(), 2);
        assert!(!delta.is_empty());
        assert!(MembershipDelta::default().is_empty());
    }

    #[test]
    fn deserializes_with_type_key() {
        let c: CollectionDefinition = serde_json::from_str(
            r#"{"id":"col-1","shopId":"shop-1","type":"AUTOMATIC","isPublished":true,
                "rules":{"matchType":"ALL","conditions":[]}}"#,
        )
        .unwrap();
        assert_eq!(c.kind, CollectionKind::Automatic);
        assert!(c.rules.is_some());
    }
}
