use std::fmt;

use serde::{Deserialize, Serialize};

use super::discount::{DiscountDefinition, DiscountKind};

/// One step of a stacking chain: a discount and the price it acted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    pub discount_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: f64,
    pub original_price: f64,
    pub discounted_price: f64,
}

impl AppliedDiscount {
    pub(crate) fn from_discount(
        discount: &DiscountDefinition,
        original_price: f64,
        discounted_price: f64,
    ) -> Self {
        Self {
            discount_id: discount.id.clone(),
            title: discount.title.clone(),
            kind: discount.kind,
            value: discount.value,
            original_price,
            discounted_price,
        }
    }

    /// How much this step took off.
    #[must_use]
    pub fn savings(&self) -> f64 {
        self.original_price - self.discounted_price
    }
}

/// Result of [`apply_discount_stack`](crate::apply_discount_stack).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct DiscountStack {
    pub starting_price: f64,
    pub final_price: f64,
    /// Applied discounts, in application order.
    pub applied: Vec<AppliedDiscount>,
}

impl DiscountStack {
    pub(crate) fn unchanged(price: f64) -> Self {
        Self {
            starting_price: price,
            final_price: price,
            applied: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_discounted(&self) -> bool {
        !self.applied.is_empty()
    }

    #[must_use]
    pub fn total_savings(&self) -> f64 {
        self.starting_price - self.final_price
    }
}

impl fmt::Display for DiscountStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.starting_price)?;
        for step in &self.applied {
            write!(f, " -[{}]-> {}", step.title, step.discounted_price)?;
        }
        Ok(())
    }
}

/// A fully resolved price for one product/customer pair.
///
/// Produced by [`quote_price`](crate::quote_price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct PriceQuote {
    pub product_id: String,
    pub variant_id: Option<String>,
    pub base_price: f64,
    pub final_price: f64,
    pub applied: Vec<AppliedDiscount>,
}

impl PriceQuote {
    #[must_use]
    pub fn total_savings(&self) -> f64 {
        self.base_price - self.final_price
    }

    #[must_use]
    pub fn is_discounted(&self) -> bool {
        !self.applied.is_empty()
    }
}
