//! Warranty duration extraction.

use super::patterns::WARRANTY_DURATION;
use crate::fields::FieldInput;

/// Warranty length in months from "<n> month(s)" or "<n> yr/year(s)".
///
/// Year units are converted at 12 months per year.
pub fn warranty_months(input: &FieldInput<'_>) -> Option<u32> {
    let caps = WARRANTY_DURATION.captures(input.original())?;
    let value: u32 = caps[1].parse().ok()?;

    let unit = caps[2].to_ascii_lowercase();
    if unit.starts_with('y') {
        Some(value * 12)
    } else {
        Some(value)
    }
}
