//! Structured field inference from recognized text.
//!
//! Each field has its own ordered ladder of heuristics. A ladder is tried top
//! to bottom and the first heuristic that finds something wins; if none does,
//! the field is absent. Ladders are independent of each other, and inference
//! never fails.

pub mod rules;

use tracing::trace;

use crate::models::document::StructuredFields;
use rules::{dates, duration, product};

/// Text prepared once for every heuristic.
#[derive(Debug, Clone)]
pub struct FieldInput<'a> {
    original: &'a str,
    normalized: String,
}

impl<'a> FieldInput<'a> {
    pub fn new(text: &'a str) -> Self {
        let normalized = rules::patterns::WHITESPACE_RUN
            .replace_all(text, " ")
            .to_lowercase();
        Self {
            original: text,
            normalized,
        }
    }

    /// The text exactly as recognized.
    pub fn original(&self) -> &'a str {
        self.original
    }

    /// Whitespace runs collapsed to one space, lowercased.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// One named step in a field's heuristic ladder.
pub struct Heuristic<T> {
    pub name: &'static str,
    pub apply: fn(&FieldInput<'_>) -> Option<T>,
}

/// Purchase date: explicit label, then the earliest date anywhere.
pub const PURCHASE_DATE_LADDER: &[Heuristic<String>] = &[
    Heuristic {
        name: "labeled",
        apply: dates::labeled_purchase_date,
    },
    Heuristic {
        name: "earliest_date",
        apply: dates::earliest_date,
    },
];

/// Expiry date: explicit label only.
pub const EXPIRY_DATE_LADDER: &[Heuristic<String>] = &[Heuristic {
    name: "labeled",
    apply: dates::labeled_expiry_date,
}];

pub const WARRANTY_MONTHS_LADDER: &[Heuristic<u32>] = &[Heuristic {
    name: "duration",
    apply: duration::warranty_months,
}];

/// Product name: explicit label, then keyword proximity.
pub const PRODUCT_NAME_LADDER: &[Heuristic<String>] = &[
    Heuristic {
        name: "labeled",
        apply: product::labeled_product_name,
    },
    Heuristic {
        name: "keyword",
        apply: product::keyword_product_name,
    },
];

/// Run a ladder and return the first hit.
pub fn first_match<T>(field: &str, ladder: &[Heuristic<T>], input: &FieldInput<'_>) -> Option<T> {
    ladder.iter().find_map(|heuristic| {
        let value = (heuristic.apply)(input);
        if value.is_some() {
            trace!("{} matched by {} heuristic", field, heuristic.name);
        }
        value
    })
}

/// Infer structured fields from text.
///
/// Pure: the same text always yields the same fields.
pub fn infer(text: &str) -> StructuredFields {
    let input = FieldInput::new(text);

    StructuredFields {
        product_name: first_match("product_name", PRODUCT_NAME_LADDER, &input),
        purchase_date: first_match("purchase_date", PURCHASE_DATE_LADDER, &input),
        expiry_date: first_match("expiry_date", EXPIRY_DATE_LADDER, &input),
        warranty_months: first_match("warranty_months", WARRANTY_MONTHS_LADDER, &input),
    }
}
