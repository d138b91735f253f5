//! Common regex patterns for warranty document field inference.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Any date token: D/M/Y family or Y/M/D family, separators / - .
    pub static ref DATE_ANY: Regex = Regex::new(
        r"\b(?:\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}|\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_SEPARATOR: Regex = Regex::new(r"[/.\-]").unwrap();

    // Labeled dates; the captured token is returned verbatim
    pub static ref PURCHASE_DATE: Regex = Regex::new(
        r"(?i)purchased?\s*(?:on|date)?[:\-\s]*(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4})"
    ).unwrap();

    pub static ref EXPIRY_DATE: Regex = Regex::new(
        r"(?i)(?:expires\s*(?:on|date)?[:\-\s]*|valid\s*until[:\-\s]*)(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4})"
    ).unwrap();

    // Warranty duration: "2 years warranty", "18 months", "1yr", "Warranty2years".
    // No leading word boundary: OCR often glues the number to the word before it.
    pub static ref WARRANTY_DURATION: Regex = Regex::new(
        r"(?i)(\d{1,2})\s*(months?|years?|yr)\s*(?:warranty)?"
    ).unwrap();

    // Product name
    pub static ref PRODUCT_LABELED: Regex = Regex::new(
        r"(?i)product\s*name[:\-\s]*([A-Za-z0-9 \-_]+)|model\s*[:\-\s]*([A-Za-z0-9 \-_]+)"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // Candidate tokens
    pub static ref DATE_CANDIDATE: Regex = Regex::new(
        r"(?i)\b(?:\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}|\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2}|\d{1,2}\s?(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s?\d{2,4})\b"
    ).unwrap();

    pub static ref SERIAL_CANDIDATE: Regex = Regex::new(
        r"\b[A-Z0-9/\-]{6,}\b"
    ).unwrap();
}
