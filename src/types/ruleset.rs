use std::fmt;

use serde::{Deserialize, Serialize};

use super::condition::{Field, Operator, RuleCondition};
use super::facts::ProductFacts;
use super::match_report::MatchReport;

/// How the conditions of a [`RuleSet`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    /// Every effective condition must hold.
    #[default]
    All,
    /// At least one effective condition must hold.
    Any,
}

/// An ordered group of [`RuleCondition`]s combined under ALL/ANY semantics.
///
/// Used both for automatic collection membership and for discount targeting.
/// A rule set whose conditions all have empty values matches nothing.
///
/// # Example
///
/// ```
/// use pricerule::{Field, Operator, ProductFacts, RuleSet};
///
/// let rules = RuleSet::all()
///     .condition(Field::Tag, Operator::Equals, "summer")
///     .condition(Field::Price, Operator::LessThan, "50");
///
/// let product = ProductFacts::builder("p-1", "Linen Shirt")
///     .price(39.0)
///     .tag("Summer")
///     .build()
///     .unwrap();
///
/// assert!(rules.matches(&product));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    #[serde(default)]
    pub conditions: Vec<RuleCondition>,
    #[serde(default)]
    pub match_type: MatchType,
}

impl RuleSet {
    #[must_use]
    pub fn new(match_type: MatchType, conditions: Vec<RuleCondition>) -> Self {
        Self {
            conditions,
            match_type,
        }
    }

    /// An empty rule set requiring every condition to hold.
    #[must_use]
    pub fn all() -> Self {
        Self::new(MatchType::All, Vec::new())
    }

    /// An empty rule set requiring any condition to hold.
    #[must_use]
    pub fn any() -> Self {
        Self::new(MatchType::Any, Vec::new())
    }

    /// Append a condition.
    #[must_use]
    pub fn condition(mut self, field: Field, operator: Operator, value: impl Into<String>) -> Self {
        self.conditions
            .push(RuleCondition::new(field, operator, value));
        self
    }

    /// Conditions whose trimmed value is non-empty, in authored order.
    pub fn effective_conditions(&self) -> impl Iterator<Item = &RuleCondition> {
        self.conditions.iter().filter(|c| c.is_effective())
    }

    /// Whether at least one condition takes part in evaluation.
    #[must_use]
    pub fn has_effective_conditions(&self) -> bool {
        self.effective_conditions().next().is_some()
    }

    /// Match this rule set against a product.
    #[must_use]
    pub fn matches(&self, facts: &ProductFacts) -> bool {
        crate::matcher::matches(self, facts)
    }

    /// Match with per-condition diagnostics, for editor previews.
    pub fn evaluate_detailed(&self, facts: &ProductFacts) -> MatchReport {
        crate::matcher::evaluate_detailed(self, facts)
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::All => write!(f, "ALL"),
            MatchType::Any => write!(f, "ANY"),
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joiner = match self.match_type {
            MatchType::All => " AND ",
            MatchType::Any => " OR ",
        };
        let parts: Vec<String> = self.conditions.iter().map(ToString::to_string).collect();
        write!(f, "{}[{}]", self.match_type, parts.join(joiner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_conditions() {
        let rules = RuleSet::any()
            .condition(Field::Title, Operator::Contains, "shirt")
            .condition(Field::Tag, Operator::Equals, "sale");

        assert_eq!(rules.match_type, MatchType::Any);
        assert_eq!(rules.conditions.len(), 2);
        assert_eq!(rules.conditions[0].field, Field::Title);
        assert_eq!(rules.conditions[1].value, "sale");
    }

    #[test]
    fn effective_conditions_skip_blank_values() {
        let rules = RuleSet::all()
            .condition(Field::Title, Operator::Contains, "")
            .condition(Field::Tag, Operator::Equals, "sale")
            .condition(Field::Sku, Operator::StartsWith, "  ");

        let effective: Vec<&RuleCondition> = rules.effective_conditions().collect();
        assert_eq!(effective.len(), 1);
        assert_eq!(effective[0].field, Field::Tag);
        assert!(rules.has_effective_conditions());
    }

    #[test]
    fn default_is_empty_all() {
        let rules = RuleSet::default();
        assert_eq!(rules.match_type, MatchType::All);
        assert!(!rules.has_effective_conditions());
    }

    #[test]
    fn display() {
        let rules = RuleSet::all()
            .condition(Field::Price, Operator::GreaterThan, "10")
            .condition(Field::Tag, Operator::Equals, "sale");
        assert_eq!(
            rules.to_string(),
            "ALL[(price greater_than \"10\") AND (tag equals \"sale\")]"
        );
    }

    #[test]
    fn deserializes_storefront_json() {
        let rules: RuleSet = serde_json::from_str(
            r#"{
                "matchType": "ANY",
                "conditions": [
                    {"field": "price", "operator": "less_than", "value": "25"},
                    {"field": "tag", "operator": "equals", "value": "clearance"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(rules.match_type, MatchType::Any);
        assert_eq!(rules.conditions.len(), 2);
        assert_eq!(rules.conditions[0].operator, Operator::LessThan);
    }
}
