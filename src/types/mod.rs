mod applied;
mod collection;
mod condition;
mod discount;
mod error;
mod facts;
mod match_report;
mod ruleset;
mod value;

pub use applied::{AppliedDiscount, DiscountStack, PriceQuote};
pub use collection::{CollectionDefinition, CollectionKind, MembershipDelta, MembershipEntry};
pub use condition::{Field, Operator, RuleCondition};
pub use discount::{CustomerTarget, DiscountDefinition, DiscountKind, DiscountTarget};
pub use error::FactsError;
pub use facts::{CustomerFacts, ProductFacts, ProductFactsBuilder, VariantFacts};
pub use match_report::{ConditionOutcome, MatchReport};
pub use ruleset::{MatchType, RuleSet};
pub use value::FieldValue;
