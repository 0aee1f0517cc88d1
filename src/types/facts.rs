use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::condition::Field;
use super::error::FactsError;
use super::value::FieldValue;

/// A purchasable variant of a product. An unset price means the variant
/// inherits the product price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantFacts {
    pub id: String,
    #[serde(default)]
    pub price: Option<f64>,
}

impl VariantFacts {
    #[must_use]
    pub fn new(id: impl Into<String>, price: Option<f64>) -> Self {
        Self {
            id: id.into(),
            price,
        }
    }

    /// The variant's own price, if it carries a non-zero one.
    #[must_use]
    pub fn effective_price(&self) -> Option<f64> {
        self.price.filter(|&p| p != 0.0)
    }
}

/// Read-only projection of a product used for rule and discount evaluation.
///
/// Built through [`ProductFacts::builder()`] (or deserialized), both of which
/// validate the record so evaluation can assume well-formed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ProductFactsBuilder")]
pub struct ProductFacts {
    id: String,
    name: String,
    price: f64,
    sku: Option<String>,
    status: String,
    availability: String,
    tags: BTreeSet<String>,
    variants: Vec<VariantFacts>,
    category_ids: BTreeSet<String>,
    collection_ids: BTreeSet<String>,
}

impl ProductFacts {
    /// Start building facts for the product with the given id and name.
    #[must_use]
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> ProductFactsBuilder {
        ProductFactsBuilder {
            id: id.into(),
            name: name.into(),
            ..ProductFactsBuilder::default()
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base product price, before any variant pricing.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[must_use]
    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn availability(&self) -> &str {
        &self.availability
    }

    #[must_use]
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    #[must_use]
    pub fn variants(&self) -> &[VariantFacts] {
        &self.variants
    }

    #[must_use]
    pub fn category_ids(&self) -> &BTreeSet<String> {
        &self.category_ids
    }

    #[must_use]
    pub fn collection_ids(&self) -> &BTreeSet<String> {
        &self.collection_ids
    }

    #[must_use]
    pub fn variant(&self, id: &str) -> Option<&VariantFacts> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Prices of variants that carry their own non-zero price.
    pub fn priced_variant_prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.variants.iter().filter_map(VariantFacts::effective_price)
    }

    #[must_use]
    pub fn has_priced_variants(&self) -> bool {
        self.priced_variant_prices().next().is_some()
    }

    /// Whether the product is live in the catalog.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }

    /// Project a rule field. Price projects the base price only; variant
    /// prices are handled by the matcher.
    #[must_use]
    pub fn field_value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Title => FieldValue::Text(&self.name),
            Field::Price => FieldValue::Number(self.price),
            Field::Sku => self.sku.as_deref().into(),
            Field::Status => FieldValue::Text(&self.status),
            Field::Availability => FieldValue::Text(&self.availability),
            Field::Tag => FieldValue::Tags(&self.tags),
        }
    }
}

/// Builder for [`ProductFacts`]. Obtained from [`ProductFacts::builder()`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFactsBuilder {
    id: String,
    name: String,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    sku: Option<String>,
    #[serde(default = "default_status")]
    status: String,
    #[serde(default = "default_availability")]
    availability: String,
    #[serde(default)]
    tags: BTreeSet<String>,
    #[serde(default)]
    variants: Vec<VariantFacts>,
    #[serde(default)]
    category_ids: BTreeSet<String>,
    #[serde(default)]
    collection_ids: BTreeSet<String>,
}

fn default_status() -> String {
    "active".to_owned()
}

fn default_availability() -> String {
    "in_stock".to_owned()
}

impl Default for ProductFactsBuilder {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            price: 0.0,
            sku: None,
            status: default_status(),
            availability: default_availability(),
            tags: BTreeSet::new(),
            variants: Vec::new(),
            category_ids: BTreeSet::new(),
            collection_ids: BTreeSet::new(),
        }
    }
}

impl ProductFactsBuilder {
    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    #[must_use]
    pub fn availability(mut self, availability: impl Into<String>) -> Self {
        self.availability = availability.into();
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add a variant with its own price.
    #[must_use]
    pub fn variant(mut self, id: impl Into<String>, price: f64) -> Self {
        self.variants.push(VariantFacts::new(id, Some(price)));
        self
    }

    /// Add a variant that inherits the product price.
    #[must_use]
    pub fn unpriced_variant(mut self, id: impl Into<String>) -> Self {
        self.variants.push(VariantFacts::new(id, None));
        self
    }

    #[must_use]
    pub fn category(mut self, id: impl Into<String>) -> Self {
        self.category_ids.insert(id.into());
        self
    }

    #[must_use]
    pub fn collection(mut self, id: impl Into<String>) -> Self {
        self.collection_ids.insert(id.into());
        self
    }

    /// Validate and produce the fact record.
    ///
    /// # Errors
    ///
    /// Returns [`FactsError`] if the id or name is blank, a price is negative
    /// or not finite, or two variants share an id.
    pub fn build(self) -> Result<ProductFacts, FactsError> {
        if self.id.trim().is_empty() {
            return Err(FactsError::EmptyProductId);
        }
        if self.name.trim().is_empty() {
            return Err(FactsError::EmptyName { product: self.id });
        }
        if !is_valid_price(self.price) {
            return Err(FactsError::InvalidPrice {
                product: self.id,
                price: self.price,
            });
        }

        let mut seen = HashSet::new();
        for variant in &self.variants {
            if !seen.insert(variant.id.as_str()) {
                return Err(FactsError::DuplicateVariant {
                    product: self.id.clone(),
                    variant: variant.id.clone(),
                });
            }
            if let Some(price) = variant.price {
                if !is_valid_price(price) {
                    return Err(FactsError::InvalidVariantPrice {
                        product: self.id.clone(),
                        variant: variant.id.clone(),
                        price,
                    });
                }
            }
        }

        Ok(ProductFacts {
            id: self.id,
            name: self.name,
            price: self.price,
            sku: self.sku,
            status: self.status,
            availability: self.availability,
            tags: self.tags,
            variants: self.variants,
            category_ids: self.category_ids,
            collection_ids: self.collection_ids,
        })
    }
}

impl TryFrom<ProductFactsBuilder> for ProductFacts {
    type Error = FactsError;

    fn try_from(builder: ProductFactsBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

/// Read-only projection of the shopper. A missing id means a guest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFacts {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
}

impl CustomerFacts {
    #[must_use]
    pub fn guest() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn registered(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            tier: None,
        }
    }

    #[must_use]
    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Some(tier.into());
        self
    }

    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.id.is_some()
    }
}
