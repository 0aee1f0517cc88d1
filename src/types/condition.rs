use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProductFacts;

/// Product attribute a [`RuleCondition`] inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Price,
    Sku,
    Status,
    Availability,
    Tag,
}

/// Comparison operators supported in rule conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
}

impl Operator {
    /// Negated operators hold vacuously when there is nothing to compare against.
    #[must_use]
    pub fn is_negated(self) -> bool {
        matches!(self, Operator::NotEquals | Operator::NotContains)
    }
}

/// A single `field operator value` predicate, as authored by a shop operator.
///
/// The value is always stored as text. Numeric fields parse it at evaluation
/// time, and a value that is empty after trimming disables the condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCondition {
    pub field: Field,
    pub operator: Operator,
    pub value: String,
}

impl RuleCondition {
    #[must_use]
    pub fn new(field: Field, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }

    /// The trimmed comparison value.
    #[must_use]
    pub fn trimmed_value(&self) -> &str {
        self.value.trim()
    }

    /// Whether this condition takes part in evaluation at all.
    #[must_use]
    pub fn is_effective(&self) -> bool {
        !self.trimmed_value().is_empty()
    }

    /// Evaluate this condition alone against a product.
    ///
    /// A condition that is not effective never holds. The price field holds
    /// if it holds for the base price or for any priced variant.
    #[must_use]
    pub fn evaluate(&self, facts: &ProductFacts) -> bool {
        self.is_effective() && crate::matcher::condition_matches(self, facts)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Price => "price",
            Field::Sku => "sku",
            Field::Status => "status",
            Field::Availability => "availability",
            Field::Tag => "tag",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
        };
        f.write_str(name)
    }
}

impl fmt::Display for RuleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} \"{}\")", self.field, self.operator, self.value)
    }
}
