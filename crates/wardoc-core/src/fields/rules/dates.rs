//! Date extraction for purchase and expiry dates.
//!
//! Numeric dates are normalized with a single rule: a first component above
//! 31 means year-first (`Y/M/D`), anything else is day-first (`D/M/Y`).
//! Tokens such as `03/04/2024` are therefore always read as 3 April; the
//! month-first reading is never tried.

use chrono::NaiveDate;

use super::patterns::{DATE_ANY, DATE_SEPARATOR, EXPIRY_DATE, PURCHASE_DATE};
use super::{FieldExtractor, TokenMatch};
use crate::fields::FieldInput;

/// Extractor for every calendar-valid numeric date token.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = TokenMatch<NaiveDate>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_ANY
            .find_iter(text)
            .filter_map(|m| {
                let date = normalize_date_token(m.as_str())?;
                Some(TokenMatch::new(date, m.as_str()))
            })
            .collect()
    }
}

/// Normalize a numeric date token to a calendar date.
///
/// Returns `None` for tokens that are not a valid date after normalization.
pub fn normalize_date_token(token: &str) -> Option<NaiveDate> {
    let parts: Vec<u32> = DATE_SEPARATOR
        .split(token)
        .map(|p| p.parse().ok())
        .collect::<Option<Vec<u32>>>()?;

    let &[first, second, third] = parts.as_slice() else {
        return None;
    };

    let (year, month, day) = if first > 31 {
        (parse_year(first), second, third)
    } else {
        (parse_year(third), second, first)
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Purchase date from a "purchase"/"purchased on"/"purchase date" label.
pub fn labeled_purchase_date(input: &FieldInput<'_>) -> Option<String> {
    PURCHASE_DATE
        .captures(input.original())
        .map(|caps| caps[1].to_string())
}

/// Earliest valid date anywhere in the text, as `YYYY-MM-DD`.
///
/// The purchase usually predates every other date on a receipt or
/// warranty card.
pub fn earliest_date(input: &FieldInput<'_>) -> Option<String> {
    DateExtractor::new()
        .extract_all(input.original())
        .into_iter()
        .map(|m| m.value)
        .min()
        .map(|date| date.format("%Y-%m-%d").to_string())
}

/// Expiry date from an "expires"/"expires on"/"valid until" label.
pub fn labeled_expiry_date(input: &FieldInput<'_>) -> Option<String> {
    EXPIRY_DATE
        .captures(input.original())
        .map(|caps| caps[1].to_string())
}

fn parse_year(year: u32) -> i32 {
    let year = year as i32;
    if year < 100 {
        // Two-digit year: 00-49 is 2000s, 50-99 is 1900s
        if year < 50 {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    }
}
