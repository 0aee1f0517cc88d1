use std::collections::BTreeSet;
use std::fmt;

/// A product attribute projected for comparison against a rule value.
///
/// Borrowed from the [`ProductFacts`](super::ProductFacts) it came from, so
/// evaluation never clones catalog data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// A textual attribute (title, sku, status, availability).
    Text(&'a str),
    /// A numeric attribute (price).
    Number(f64),
    /// The product's tag names.
    Tags(&'a BTreeSet<String>),
    /// An optional attribute the product does not carry (e.g. no sku).
    Missing,
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(v: &'a str) -> Self {
        FieldValue::Text(v)
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl<'a> From<&'a BTreeSet<String>> for FieldValue<'a> {
    fn from(v: &'a BTreeSet<String>) -> Self {
        FieldValue::Tags(v)
    }
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(v: Option<&'a str>) -> Self {
        v.map_or(FieldValue::Missing, FieldValue::Text)
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(v) => write!(f, "\"{v}\""),
            FieldValue::Number(v) => write!(f, "{v}"),
            FieldValue::Tags(tags) => {
                let names: Vec<&str> = tags.iter().map(String::as_str).collect();
                write!(f, "[{}]", names.join(", "))
            }
            FieldValue::Missing => write!(f, "<missing>"),
        }
    }
}
