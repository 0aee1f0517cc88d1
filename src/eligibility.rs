use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{CustomerFacts, CustomerTarget, DiscountDefinition, DiscountTarget, ProductFacts};

/// The first check a discount failed during eligibility filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ineligibility {
    Inactive,
    /// Coupon-only discounts are never applied automatically.
    NotAutomatic,
    OutsideWindow,
    CustomerNotTargeted,
    ProductNotTargeted,
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Ineligibility::Inactive => "inactive",
            Ineligibility::NotAutomatic => "not automatic",
            Ineligibility::OutsideWindow => "outside active window",
            Ineligibility::CustomerNotTargeted => "customer not targeted",
            Ineligibility::ProductNotTargeted => "product not targeted",
        };
        f.write_str(reason)
    }
}

/// Return the automatic discounts that apply to `product` for `customer` at
/// `now`, highest priority first. Ties keep catalog order.
///
/// `early_access` is resolved by the caller (see
/// [`EngineConfig::early_access_for`](crate::EngineConfig::early_access_for));
/// when set, start and end dates are not checked.
#[must_use]
pub fn filter_eligible_discounts<'a>(
    discounts: &'a [DiscountDefinition],
    product: &ProductFacts,
    customer: &CustomerFacts,
    now: DateTime<Utc>,
    early_access: bool,
) -> Vec<&'a DiscountDefinition> {
    let mut eligible: Vec<&DiscountDefinition> = discounts
        .iter()
        .filter(|discount| {
            match check_eligibility(discount, product, customer, now, early_access) {
                Ok(()) => true,
                Err(reason) => {
                    debug!(
                        discount = %discount.id,
                        product = product.id(),
                        %reason,
                        "discount not eligible"
                    );
                    false
                }
            }
        })
        .collect();

    // sort_by is stable, so equal priorities keep their catalog order
    eligible.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    eligible
}

/// Run the eligibility checks for one discount, stopping at the first failure.
///
/// # Errors
///
/// Returns the [`Ineligibility`] reason of the first failed check.
pub fn check_eligibility(
    discount: &DiscountDefinition,
    product: &ProductFacts,
    customer: &CustomerFacts,
    now: DateTime<Utc>,
    early_access: bool,
) -> Result<(), Ineligibility> {
    if !discount.is_active {
        return Err(Ineligibility::Inactive);
    }
    if !discount.is_automatic {
        return Err(Ineligibility::NotAutomatic);
    }
    if !early_access && !discount.is_within_window(now) {
        return Err(Ineligibility::OutsideWindow);
    }
    if !customer_targeted(discount, customer) {
        return Err(Ineligibility::CustomerNotTargeted);
    }
    if !product_targeted(discount, product) {
        return Err(Ineligibility::ProductNotTargeted);
    }
    Ok(())
}

fn customer_targeted(discount: &DiscountDefinition, customer: &CustomerFacts) -> bool {
    match discount.customer_target {
        CustomerTarget::AllCustomers => true,
        CustomerTarget::RegisteredCustomers => customer.is_registered(),
        CustomerTarget::SpecificCustomers => customer
            .id
            .as_deref()
            .is_some_and(|id| contains(discount.specific_customers.as_ref(), id)),
        CustomerTarget::CustomerTiers => {
            customer.is_registered()
                && customer
                    .tier
                    .as_deref()
                    .is_some_and(|tier| contains(discount.customer_tiers.as_ref(), tier))
        }
    }
}

fn product_targeted(discount: &DiscountDefinition, product: &ProductFacts) -> bool {
    match discount.target {
        DiscountTarget::AllProducts => true,
        DiscountTarget::SpecificProducts => {
            contains(discount.applicable_products.as_ref(), product.id())
        }
        DiscountTarget::SpecificCategories => {
            intersects(discount.applicable_categories.as_ref(), product.category_ids())
        }
        DiscountTarget::SpecificCollections => {
            intersects(discount.applicable_collections.as_ref(), product.collection_ids())
        }
        DiscountTarget::ExcludeProducts => {
            !contains(discount.excluded_products.as_ref(), product.id())
        }
        DiscountTarget::ExcludeCategories => {
            !intersects(discount.excluded_categories.as_ref(), product.category_ids())
        }
        DiscountTarget::ExcludeCollections => {
            !intersects(discount.excluded_collections.as_ref(), product.collection_ids())
        }
    }
}

fn contains(list: Option<&BTreeSet<String>>, id: &str) -> bool {
    list.is_some_and(|ids| ids.contains(id))
}

fn intersects(list: Option<&BTreeSet<String>>, ids: &BTreeSet<String>) -> bool {
    list.is_some_and(|list| !list.is_disjoint(ids))
}
