//! Promotion and segmentation rule engine for storefronts.
//!
//! Given plain fact records for a product and a customer, the engine decides
//! which automatic collections the product belongs to, which automatic
//! discounts apply, and how those discounts stack into a final price. Every
//! entry point is a pure function over its inputs: callers fetch the facts and
//! definitions and persist whatever comes back.

mod config;
mod eligibility;
mod error;
mod evaluate;
mod matcher;
mod membership;
mod pricing;
mod stacking;
mod types;

pub use config::{ConfigError, EngineConfig, TierBenefits};
pub use eligibility::{check_eligibility, filter_eligible_discounts, Ineligibility};
pub use error::Error;
pub use evaluate::evaluate_condition;
pub use matcher::matches_rule_set;
pub use membership::{resolve_collection_membership, resolve_membership_delta};
pub use pricing::{quote_price, resolve_base_price};
pub use stacking::{apply_discount_stack, discounted_price};
pub use types::{
    AppliedDiscount, CollectionDefinition, CollectionKind, ConditionOutcome, CustomerFacts,
    CustomerTarget, DiscountDefinition, DiscountKind, DiscountStack, DiscountTarget, FactsError,
    Field, FieldValue, MatchReport, MatchType, MembershipDelta, MembershipEntry, Operator,
    PriceQuote, ProductFacts, ProductFactsBuilder, RuleCondition, RuleSet, VariantFacts,
};
