use thiserror::Error;

/// A fact record handed to the engine violates its shape contract.
///
/// Raised at the boundary, when facts are assembled; evaluation itself
/// never fails.
#[derive(Debug, Error, PartialEq)]
pub enum FactsError {
    #[error("product id must not be empty")]
    EmptyProductId,

    #[error("product '{product}' has an empty name")]
    EmptyName { product: String },

    #[error("product '{product}' has invalid price {price}")]
    InvalidPrice { product: String, price: f64 },

    #[error("variant '{variant}' of product '{product}' has invalid price {price}")]
    InvalidVariantPrice {
        product: String,
        variant: String,
        price: f64,
    },

    #[error("duplicate variant id '{variant}' in product '{product}'")]
    DuplicateVariant { product: String, variant: String },
}
