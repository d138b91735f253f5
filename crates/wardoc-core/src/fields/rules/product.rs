//! Product name extraction.

use super::patterns::PRODUCT_LABELED;
use crate::fields::FieldInput;

/// Product keywords, in priority order.
pub const PRODUCT_KEYWORDS: &[&str] = &[
    "phone",
    "laptop",
    "tv",
    "refrigerator",
    "watch",
    "ac",
    "camera",
];

/// Characters kept before a keyword hit.
const WINDOW_LEAD: usize = 20;
/// Total window width in characters.
const WINDOW_WIDTH: usize = 40;

/// Product name from a "product name" or "model" label.
pub fn labeled_product_name(input: &FieldInput<'_>) -> Option<String> {
    let caps = PRODUCT_LABELED.captures(input.original())?;
    let name = caps.get(1).or_else(|| caps.get(2))?.as_str().trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Text surrounding the first known product keyword.
///
/// Low precision: keywords match inside words ("ac" in "contact"), and the
/// window is cut by character count, not word boundaries.
pub fn keyword_product_name(input: &FieldInput<'_>) -> Option<String> {
    let text = input.normalized();

    let byte_index = PRODUCT_KEYWORDS
        .iter()
        .find_map(|keyword| text.find(keyword))?;

    let char_index = text[..byte_index].chars().count();
    let start = char_index.saturating_sub(WINDOW_LEAD);
    let end = char_index + (WINDOW_WIDTH - WINDOW_LEAD);

    let window: String = text.chars().skip(start).take(end - start).collect();
    let window = window.trim();

    if window.is_empty() {
        None
    } else {
        Some(window.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_product_name() {
        let input = FieldInput::new("Product Name: Galaxy S23 Ultra\nIMEI 3567");
        assert_eq!(labeled_product_name(&input), Some("Galaxy S23 Ultra".to_string()));
    }

    #[test]
    fn test_labeled_model() {
        let input = FieldInput::new("MODEL - KDL-32W600_B\nSerial: X1");
        assert_eq!(labeled_product_name(&input), Some("KDL-32W600_B".to_string()));
    }

    #[test]
    fn test_labeled_absent() {
        let input = FieldInput::new("Receipt 0042\nTotal 45.00");
        assert_eq!(labeled_product_name(&input), None);
    }

    #[test]
    fn test_keyword_window() {
        let input = FieldInput::new("Thank you for buying the new Sony CAMERA\nfrom our store today");
        assert_eq!(
            keyword_product_name(&input),
            Some("buying the new sony camera from our stor".to_string())
        );
    }

    #[test]
    fn test_keyword_window_clamped_to_start() {
        let input = FieldInput::new("smart watch and phone charger");
        assert_eq!(
            keyword_product_name(&input),
            Some("smart watch and phone charger".to_string())
        );
    }

    #[test]
    fn test_keyword_priority_follows_list_order() {
        // "phone" outranks "watch" even though "watch" appears first.
        let input = FieldInput::new("watch strap x ........................... phone case");
        let name = keyword_product_name(&input).unwrap();
        assert!(name.ends_with("phone case"), "got {:?}", name);
        assert!(!name.contains("watch"));
    }

    #[test]
    fn test_keyword_window_handles_multibyte_text() {
        let input = FieldInput::new("Zakup: telefon — phone ✓ gwarancja");
        let name = keyword_product_name(&input).unwrap();
        assert!(name.contains("phone"));
    }

    #[test]
    fn test_keyword_absent() {
        let input = FieldInput::new("Receipt total 45.00");
        assert_eq!(keyword_product_name(&input), None);
    }
}
