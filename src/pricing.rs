use chrono::{DateTime, Utc};

use crate::{
    apply_discount_stack, filter_eligible_discounts, CustomerFacts, DiscountDefinition,
    PriceQuote, ProductFacts,
};

/// The price discounts start from.
///
/// A requested variant is priced at its own price, even when that is zero; an
/// unpriced or unknown variant inherits the base price. Without a requested
/// variant, a product whose base price is zero is priced at its cheapest priced
/// variant, and anything else uses the base price.
#[must_use]
pub fn resolve_base_price(product: &ProductFacts, variant_id: Option<&str>) -> f64 {
    if let Some(id) = variant_id {
        return product
            .variant(id)
            .and_then(|v| v.price)
            .unwrap_or(product.price());
    }
    if product.price() == 0.0 {
        if let Some(cheapest) = product.priced_variant_prices().reduce(f64::min) {
            return cheapest;
        }
    }
    product.price()
}

/// Price one product for one customer: resolve the base price, filter the
/// shop's automatic discounts and stack the eligible ones.
///
/// This is the single pricing path shared by product pages and checkout.
pub fn quote_price(
    discounts: &[DiscountDefinition],
    product: &ProductFacts,
    customer: &CustomerFacts,
    variant_id: Option<&str>,
    now: DateTime<Utc>,
    early_access: bool,
) -> PriceQuote {
    let base_price = resolve_base_price(product, variant_id);
    let eligible = filter_eligible_discounts(discounts, product, customer, now, early_access);
    let stack = apply_discount_stack(eligible, base_price);

    PriceQuote {
        product_id: product.id().to_owned(),
        variant_id: variant_id.map(str::to_owned),
        base_price,
        final_price: stack.final_price,
        applied: stack.applied,
    }
}
