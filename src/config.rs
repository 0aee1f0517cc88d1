use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CustomerFacts;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid engine configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Benefits granted to every customer of a tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBenefits {
    /// Receive automatic discounts outside their start/end window.
    #[serde(default)]
    pub early_access: bool,
}

/// Segment benefit configuration, keyed by customer tier label.
///
/// The engine never consults this on its own: callers resolve the
/// early-access flag here and pass it to
/// [`filter_eligible_discounts`](crate::filter_eligible_discounts).
///
/// ```
/// use pricerule::{CustomerFacts, EngineConfig};
///
/// let config = EngineConfig::from_toml(
///     r#"
///     [tiers.gold]
///     early_access = true
///     "#,
/// )
/// .unwrap();
///
/// let gold = CustomerFacts::registered("c-1").with_tier("gold");
/// assert!(config.early_access_for(&gold));
/// assert!(!config.early_access_for(&CustomerFacts::guest()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub tiers: HashMap<String, TierBenefits>,
}

impl EngineConfig {
    /// Parse a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the document is not valid TOML or does not
    /// match the expected shape.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error`](crate::Error) on I/O or parse failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::Error> {
        let input = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&input)?)
    }

    #[must_use]
    pub fn with_tier(mut self, tier: impl Into<String>, benefits: TierBenefits) -> Self {
        self.tiers.insert(tier.into(), benefits);
        self
    }

    /// Benefits of a tier; unknown tiers get none.
    #[must_use]
    pub fn benefits(&self, tier: &str) -> TierBenefits {
        self.tiers.get(tier).copied().unwrap_or_default()
    }

    /// Whether `customer` may receive discounts before they start.
    ///
    /// Requires an identified customer with a tier granting early access.
    #[must_use]
    pub fn early_access_for(&self, customer: &CustomerFacts) -> bool {
        customer.is_registered()
            && customer
                .tier
                .as_deref()
                .is_some_and(|tier| self.benefits(tier).early_access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tiers() {
        let config = EngineConfig::from_toml(
            r#"
            [tiers.gold]
            early_access = true

            [tiers.silver]
            "#,
        )
        .unwrap();
        assert!(config.benefits("gold").early_access);
        assert!(!config.benefits("silver").early_access);
        assert_eq!(config.benefits("bronze"), TierBenefits::default());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(EngineConfig::from_toml("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn invalid_document_is_error() {
        let err = EngineConfig::from_toml("[tiers.gold]\nearly_access = \"yes\"").unwrap_err();
        assert!(err.to_string().starts_with("invalid engine configuration"));
    }

    #[test]
    fn early_access_requires_registered_customer() {
        let config = EngineConfig::default().with_tier("gold", TierBenefits { early_access: true });
        assert!(config.early_access_for(&CustomerFacts::registered("c").with_tier("gold")));
        assert!(!config.early_access_for(&CustomerFacts::guest().with_tier("gold")));
        assert!(!config.early_access_for(&CustomerFacts::registered("c").with_tier("silver")));
        assert!(!config.early_access_for(&CustomerFacts::registered("c")));
    }

    #[test]
    fn from_missing_file_is_io_error() {
        let err = EngineConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
