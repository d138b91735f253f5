//! Loose candidate tokens: every date-like and serial-like string.

use std::collections::HashSet;

use regex::Regex;

use super::patterns::{DATE_ANY, DATE_CANDIDATE, SERIAL_CANDIDATE};
use crate::models::document::CandidateTokens;

/// Date-like tokens (numeric and "12 Jan 2024" forms) in reading order.
pub fn candidate_dates(text: &str) -> Vec<String> {
    unique_matches(&DATE_CANDIDATE, text, |_| true)
}

/// Serial/model number-like tokens in reading order.
///
/// Tokens that are entirely a numeric date are left to [`candidate_dates`].
pub fn candidate_serials(text: &str) -> Vec<String> {
    unique_matches(&SERIAL_CANDIDATE, text, |token| !is_date_token(token))
}

/// Both candidate lists for one text.
pub fn candidate_tokens(text: &str) -> CandidateTokens {
    CandidateTokens {
        dates: candidate_dates(text),
        serials: candidate_serials(text),
    }
}

fn is_date_token(token: &str) -> bool {
    DATE_ANY
        .find(token)
        .is_some_and(|m| m.start() == 0 && m.end() == token.len())
}

fn unique_matches(pattern: &Regex, text: &str, keep: impl Fn(&str) -> bool) -> Vec<String> {
    let mut seen = HashSet::new();
    pattern
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| keep(token))
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RECEIPT: &str = "Serial: SN-4821-XZ\nSold 12 Jan 2024, delivered 15/01/2024\n\
                           IMEI 356789012345678\nRe-issued 15/01/2024 for SN-4821-XZ";

    #[test]
    fn test_candidate_dates() {
        assert_eq!(candidate_dates(RECEIPT), vec!["12 Jan 2024", "15/01/2024"]);
    }

    #[test]
    fn test_candidate_dates_month_names() {
        assert_eq!(
            candidate_dates("bought 3 march 2023, printed 2023.04.01"),
            vec!["3 march 2023", "2023.04.01"]
        );
    }

    #[test]
    fn test_candidate_serials_skip_dates() {
        assert_eq!(candidate_serials(RECEIPT), vec!["SN-4821-XZ", "356789012345678"]);
    }

    #[test]
    fn test_candidate_tokens_empty_text() {
        assert_eq!(candidate_tokens(""), CandidateTokens::default());
    }
}
