use std::cmp::Ordering;

use tracing::debug;

use crate::{AppliedDiscount, DiscountDefinition, DiscountKind, DiscountStack};

/// Apply already-eligible, priority-ordered discounts to `starting_price`.
///
/// Discounts are applied in sequence, each acting on the price left by the
/// previous one. A discount that would not lower the price is skipped and not
/// recorded. An exclusive discount (`can_combine = false`) may only open the
/// chain: reached with an empty chain it is applied and ends the reduction;
/// reached after anything was applied it ends the reduction without applying.
/// Discount kinds other than percentage and fixed are ignored.
///
/// # Example
///
/// ```
/// use pricerule::{apply_discount_stack, DiscountDefinition};
///
/// let discounts = [
///     DiscountDefinition::percentage("a", "20% off", 20.0),
///     DiscountDefinition::percentage("b", "10% off", 10.0),
/// ];
/// let stack = apply_discount_stack(&discounts, 100.0);
/// assert_eq!(stack.final_price, 72.0);
/// assert_eq!(stack.applied.len(), 2);
/// ```
pub fn apply_discount_stack<'a, I>(discounts: I, starting_price: f64) -> DiscountStack
where
    I: IntoIterator<Item = &'a DiscountDefinition>,
{
    let mut stack = DiscountStack::unchanged(starting_price);
    let mut current = starting_price;

    for discount in discounts {
        let Some(discounted) = discounted_price(discount, current) else {
            continue;
        };
        if discounted.partial_cmp(&current) != Some(Ordering::Less) {
            continue;
        }

        if !discount.can_combine && stack.is_discounted() {
            debug!(
                discount = %discount.id,
                "exclusive discount reached after others applied, stopping"
            );
            break;
        }

        stack
            .applied
            .push(AppliedDiscount::from_discount(discount, current, discounted));
        current = discounted;

        if !discount.can_combine {
            debug!(discount = %discount.id, "exclusive discount applied, stopping");
            break;
        }
    }

    stack.final_price = current;
    stack
}

/// The price after applying `discount` to `price`, or `None` for discount
/// kinds that do not act on product prices.
#[must_use]
pub fn discounted_price(discount: &DiscountDefinition, price: f64) -> Option<f64> {
    match discount.kind {
        DiscountKind::Percentage => {
            let discounted = price - price * discount.value / 100.0;
            Some(match discount.max_discount {
                Some(cap) => discounted.max(price - cap),
                None => discounted,
            })
        }
        DiscountKind::Fixed => Some((price - discount.value).max(0.0)),
        DiscountKind::FreeShipping | DiscountKind::BuyXGetY => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(id: &str, value: f64) -> DiscountDefinition {
        DiscountDefinition::percentage(id, id.to_uppercase(), value)
    }

    fn chain(stack: &DiscountStack) -> Vec<(&str, f64, f64)> {
        stack
            .applied
            .iter()
            .map(|a| (a.discount_id.as_str(), a.original_price, a.discounted_price))
            .collect()
    }

    #[test]
    fn empty_stack_is_unchanged() {
        let stack = apply_discount_stack(&[], 59.0);
        assert_eq!(stack.final_price, 59.0);
        assert!(stack.applied.is_empty());
    }

    #[test]
    fn combinable_percentages_compound() {
        let discounts = [pct("twenty", 20.0), pct("ten", 10.0)];
        let stack = apply_discount_stack(&discounts, 100.0);
        assert_eq!(stack.final_price, 72.0);
        assert_eq!(chain(&stack), [("twenty", 100.0, 80.0), ("ten", 80.0, 72.0)]);
    }

    #[test]
    fn exclusive_first_stops_the_chain() {
        let discounts = [pct("a", 50.0).exclusive(), pct("b", 10.0)];
        let stack = apply_discount_stack(&discounts, 100.0);
        assert_eq!(stack.final_price, 50.0);
        assert_eq!(chain(&stack), [("a", 100.0, 50.0)]);
    }

    #[test]
    fn exclusive_after_applied_is_rejected_and_stops() {
        let discounts = [pct("b", 10.0), pct("a", 50.0).exclusive(), pct("c", 10.0)];
        let stack = apply_discount_stack(&discounts, 100.0);
        assert_eq!(stack.final_price, 90.0);
        assert_eq!(chain(&stack), [("b", 100.0, 90.0)]);
    }

    #[test]
    fn noop_exclusive_is_skipped_not_stopping() {
        let discounts = [
            pct("b", 10.0),
            DiscountDefinition::fixed("zero", "Nothing", 0.0).exclusive(),
            pct("c", 10.0),
        ];
        let stack = apply_discount_stack(&discounts, 100.0);
        assert_eq!(stack.final_price, 81.0);
        assert_eq!(stack.applied.len(), 2);
    }

    #[test]
    fn exclusive_after_noop_is_still_first() {
        let discounts = [pct("none", 0.0), pct("a", 50.0).exclusive()];
        let stack = apply_discount_stack(&discounts, 100.0);
        assert_eq!(chain(&stack), [("a", 100.0, 50.0)]);
    }

    #[test]
    fn max_discount_caps_reduction() {
        let discounts = [pct("big", 90.0).with_max_discount(20.0)];
        let stack = apply_discount_stack(&discounts, 100.0);
        assert_eq!(stack.final_price, 80.0);
    }

    #[test]
    fn max_discount_above_reduction_has_no_effect() {
        let discounts = [pct("small", 10.0).with_max_discount(50.0)];
        assert_eq!(apply_discount_stack(&discounts, 100.0).final_price, 90.0);
    }

    #[test]
    fn fixed_floors_at_zero() {
        let discounts = [DiscountDefinition::fixed("f", "Big", 500.0)];
        let stack = apply_discount_stack(&discounts, 120.0);
        assert_eq!(stack.final_price, 0.0);
        assert_eq!(stack.applied.len(), 1);
    }

    #[test]
    fn nothing_applies_at_zero_price() {
        let discounts = [DiscountDefinition::fixed("f", "Five", 5.0), pct("p", 10.0)];
        let stack = apply_discount_stack(&discounts, 0.0);
        assert_eq!(stack.final_price, 0.0);
        assert!(stack.applied.is_empty());
    }

    #[test]
    fn non_price_kinds_are_skipped() {
        let discounts = [
            DiscountDefinition::new("ship", "Free shipping", DiscountKind::FreeShipping, 0.0)
                .exclusive(),
            DiscountDefinition::new("bogo", "Buy one get one", DiscountKind::BuyXGetY, 100.0),
            pct("p", 10.0),
        ];
        let stack = apply_discount_stack(&discounts, 50.0);
        assert_eq!(chain(&stack), [("p", 50.0, 45.0)]);
    }

    #[test]
    fn accepts_eligibility_output() {
        let catalog = [pct("a", 10.0), pct("b", 10.0)];
        let ordered: Vec<&DiscountDefinition> = catalog.iter().rev().collect();
        let stack = apply_discount_stack(ordered, 200.0);
        assert_eq!(chain(&stack), [("b", 200.0, 180.0), ("a", 180.0, 162.0)]);
    }

    #[test]
    fn discounted_price_by_kind() {
        assert_eq!(discounted_price(&pct("p", 25.0), 80.0), Some(60.0));
        assert_eq!(
            discounted_price(&DiscountDefinition::fixed("f", "f", 15.0), 80.0),
            Some(65.0)
        );
        let ship = DiscountDefinition::new("s", "s", DiscountKind::FreeShipping, 0.0);
        assert_eq!(discounted_price(&ship, 80.0), None);
    }
}
