use tracing::trace;

use crate::types::ConditionOutcome;
use crate::{
    evaluate_condition, Field, FieldValue, MatchReport, MatchType, ProductFacts, RuleCondition,
    RuleSet,
};

/// Match a rule set against a product.
///
/// Blank-valued conditions are ignored; a rule set with no remaining
/// conditions matches nothing, under either match type.
#[must_use]
pub fn matches_rule_set(rule_set: &RuleSet, facts: &ProductFacts) -> bool {
    matches(rule_set, facts)
}

pub(crate) fn matches(rule_set: &RuleSet, facts: &ProductFacts) -> bool {
    let mut effective = rule_set.effective_conditions().peekable();
    if effective.peek().is_none() {
        return false;
    }
    match rule_set.match_type {
        MatchType::All => effective.all(|c| condition_matches(c, facts)),
        MatchType::Any => effective.any(|c| condition_matches(c, facts)),
    }
}

pub(crate) fn evaluate_detailed(rule_set: &RuleSet, facts: &ProductFacts) -> MatchReport {
    let (effective, skipped): (Vec<&RuleCondition>, Vec<&RuleCondition>) =
        rule_set.conditions.iter().partition(|c| c.is_effective());

    let outcomes: Vec<ConditionOutcome> = effective
        .into_iter()
        .map(|c| ConditionOutcome {
            condition: c.clone(),
            matched: condition_matches(c, facts),
        })
        .collect();

    let matched = !outcomes.is_empty()
        && match rule_set.match_type {
            MatchType::All => outcomes.iter().all(|o| o.matched),
            MatchType::Any => outcomes.iter().any(|o| o.matched),
        };

    MatchReport::new(
        rule_set.match_type,
        matched,
        outcomes,
        skipped.into_iter().cloned().collect(),
    )
}

/// Evaluate a single condition, applying the variant-price policy for the
/// price field.
pub(crate) fn condition_matches(condition: &RuleCondition, facts: &ProductFacts) -> bool {
    let rule_value = condition.trimmed_value();
    let matched = match condition.field {
        Field::Price => price_matches(condition, rule_value, facts),
        field => evaluate_condition(facts.field_value(field), condition.operator, rule_value),
    };
    trace!(product = facts.id(), %condition, matched, "condition evaluated");
    matched
}

// With priced variants the condition holds if it holds for the base price or
// for any priced variant. Without them only the base price counts.
fn price_matches(condition: &RuleCondition, rule_value: &str, facts: &ProductFacts) -> bool {
    let holds = |price: f64| {
        evaluate_condition(FieldValue::Number(price), condition.operator, rule_value)
    };
    if !facts.has_priced_variants() {
        return holds(facts.price());
    }
    holds(facts.price()) || facts.priced_variant_prices().any(holds)
}
