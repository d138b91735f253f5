//! Rule-based field extractors for warranty documents.

pub mod dates;
pub mod duration;
pub mod patterns;
pub mod product;
pub mod tokens;

pub use dates::{normalize_date_token, DateExtractor};
pub use tokens::{candidate_dates, candidate_serials, candidate_tokens};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract all occurrences of the field, in text order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A parsed value together with the text it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch<T> {
    /// Parsed value.
    pub value: T,
    /// Source text that was matched.
    pub source: String,
}

impl<T> TokenMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            source: source.into(),
        }
    }
}
