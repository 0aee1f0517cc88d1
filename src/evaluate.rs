use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::{FieldValue, Operator};

/// Evaluate one predicate against one projected field value.
///
/// Text and tag comparisons ignore case. Price comparisons parse `rule_value`
/// as a number, and an unparsable value never matches. A missing attribute
/// satisfies only the negated operators (`not_equals`, `not_contains`).
/// Operators that make no sense for a field kind (ordering on text,
/// substring tests on numbers) never match.
///
/// This function does not skip blank rule values; rule sets filter those
/// out before evaluating.
#[must_use]
pub fn evaluate_condition(value: FieldValue<'_>, op: Operator, rule_value: &str) -> bool {
    match value {
        FieldValue::Text(text) => compare_text(text, op, rule_value),
        FieldValue::Number(number) => compare_number(number, op, rule_value),
        FieldValue::Tags(tags) => compare_tags(tags, op, rule_value),
        FieldValue::Missing => op.is_negated(),
    }
}

fn compare_text(text: &str, op: Operator, rule_value: &str) -> bool {
    let text = text.to_lowercase();
    let needle = rule_value.to_lowercase();
    match op {
        Operator::Equals => text == needle,
        Operator::NotEquals => text != needle,
        Operator::Contains => text.contains(&needle),
        Operator::NotContains => !text.contains(&needle),
        Operator::StartsWith => text.starts_with(&needle),
        Operator::EndsWith => text.ends_with(&needle),
        Operator::GreaterThan | Operator::LessThan => false,
    }
}

fn compare_number(number: f64, op: Operator, rule_value: &str) -> bool {
    let Some(target) = parse_number(rule_value) else {
        return false;
    };
    let Some(ord) = number.partial_cmp(&target) else {
        return false;
    };
    match op {
        Operator::Equals => ord == Ordering::Equal,
        Operator::NotEquals => ord != Ordering::Equal,
        Operator::GreaterThan => ord == Ordering::Greater,
        Operator::LessThan => ord == Ordering::Less,
        Operator::Contains
        | Operator::NotContains
        | Operator::StartsWith
        | Operator::EndsWith => false,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn compare_tags(tags: &BTreeSet<String>, op: Operator, rule_value: &str) -> bool {
    let needle = rule_value.to_lowercase();
    let mut names = tags.iter().map(|t| t.to_lowercase());
    match op {
        Operator::Equals => names.any(|t| t == needle),
        Operator::NotEquals => !names.any(|t| t == needle),
        Operator::Contains => names.any(|t| t.contains(&needle)),
        Operator::NotContains => !names.any(|t| t.contains(&needle)),
        Operator::StartsWith => names.any(|t| t.starts_with(&needle)),
        Operator::EndsWith => names.any(|t| t.ends_with(&needle)),
        Operator::GreaterThan | Operator::LessThan => false,
    }
}
