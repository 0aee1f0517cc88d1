use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a discount reduces a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    /// `value` percent off the running price.
    Percentage,
    /// `value` currency units off the running price, floored at zero.
    Fixed,
    /// Applied to shipping at checkout; never reduces a product price.
    FreeShipping,
    /// Applied to cart lines at checkout; never reduces a product price.
    BuyXGetY,
}

/// Which shoppers a discount is offered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerTarget {
    #[default]
    AllCustomers,
    RegisteredCustomers,
    SpecificCustomers,
    CustomerTiers,
}

/// Which products a discount is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountTarget {
    #[default]
    AllProducts,
    SpecificProducts,
    SpecificCategories,
    SpecificCollections,
    ExcludeProducts,
    ExcludeCategories,
    ExcludeCollections,
}

/// An operator-authored discount as stored by the shop.
///
/// The engine only reads these. Unset allow-lists and exclusion lists are
/// treated the same as empty ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountDefinition {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: f64,
    #[serde(default)]
    pub max_discount: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_automatic: bool,
    /// Higher priorities are applied first. Any number is accepted, including
    /// fractional values.
    #[serde(default)]
    pub priority: f64,
    #[serde(default = "default_true")]
    pub can_combine: bool,
    #[serde(default)]
    pub customer_target: CustomerTarget,
    #[serde(default)]
    pub specific_customers: Option<BTreeSet<String>>,
    #[serde(default)]
    pub customer_tiers: Option<BTreeSet<String>>,
    #[serde(default)]
    pub target: DiscountTarget,
    #[serde(default)]
    pub applicable_products: Option<BTreeSet<String>>,
    #[serde(default)]
    pub applicable_categories: Option<BTreeSet<String>>,
    #[serde(default)]
    pub applicable_collections: Option<BTreeSet<String>>,
    #[serde(default)]
    pub excluded_products: Option<BTreeSet<String>>,
    #[serde(default)]
    pub excluded_categories: Option<BTreeSet<String>>,
    #[serde(default)]
    pub excluded_collections: Option<BTreeSet<String>>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl DiscountDefinition {
    /// Create an active, automatic, combinable discount on every product for
    /// every customer.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: DiscountKind,
        value: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            value,
            max_discount: None,
            is_active: true,
            is_automatic: true,
            priority: 0.0,
            can_combine: true,
            customer_target: CustomerTarget::AllCustomers,
            specific_customers: None,
            customer_tiers: None,
            target: DiscountTarget::AllProducts,
            applicable_products: None,
            applicable_categories: None,
            applicable_collections: None,
            excluded_products: None,
            excluded_categories: None,
            excluded_collections: None,
            start_date: None,
            end_date: None,
        }
    }

    #[must_use]
    pub fn percentage(id: impl Into<String>, title: impl Into<String>, percent: f64) -> Self {
        Self::new(id, title, DiscountKind::Percentage, percent)
    }

    #[must_use]
    pub fn fixed(id: impl Into<String>, title: impl Into<String>, amount: f64) -> Self {
        Self::new(id, title, DiscountKind::Fixed, amount)
    }

    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<f64>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Mark the discount as exclusive: it never stacks with another.
    #[must_use]
    pub fn exclusive(mut self) -> Self {
        self.can_combine = false;
        self
    }

    #[must_use]
    pub fn with_max_discount(mut self, cap: f64) -> Self {
        self.max_discount = Some(cap);
        self
    }

    /// Only applicable when entered as a code; never applied automatically.
    #[must_use]
    pub fn manual(mut self) -> Self {
        self.is_automatic = false;
        self
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    #[must_use]
    pub fn with_window(mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    #[must_use]
    pub fn for_registered_customers(mut self) -> Self {
        self.customer_target = CustomerTarget::RegisteredCustomers;
        self
    }

    #[must_use]
    pub fn for_customers<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.customer_target = CustomerTarget::SpecificCustomers;
        self.specific_customers = Some(collect(ids));
        self
    }

    #[must_use]
    pub fn for_tiers<I, S>(mut self, tiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.customer_target = CustomerTarget::CustomerTiers;
        self.customer_tiers = Some(collect(tiers));
        self
    }

    /// Scope the discount with `target`, using `ids` as its allow-list or
    /// exclusion list.
    #[must_use]
    pub fn targeting<I, S>(mut self, target: DiscountTarget, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target = target;
        let ids = Some(collect(ids));
        match target {
            DiscountTarget::AllProducts => {}
            DiscountTarget::SpecificProducts => self.applicable_products = ids,
            DiscountTarget::SpecificCategories => self.applicable_categories = ids,
            DiscountTarget::SpecificCollections => self.applicable_collections = ids,
            DiscountTarget::ExcludeProducts => self.excluded_products = ids,
            DiscountTarget::ExcludeCategories => self.excluded_categories = ids,
            DiscountTarget::ExcludeCollections => self.excluded_collections = ids,
        }
        self
    }

    /// Whether `now` falls inside the configured window. Both ends are
    /// inclusive and an unset end is open.
    #[must_use]
    pub fn is_within_window(&self, now: DateTime<Utc>) -> bool {
        self.start_date.is_none_or(|start| start <= now)
            && self.end_date.is_none_or(|end| end >= now)
    }
}

fn collect<I, S>(ids: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter().map(Into::into).collect()
}
