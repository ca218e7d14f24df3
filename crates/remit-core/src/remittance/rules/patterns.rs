//! Marker word sets and regex patterns for remittance documents.

use lazy_static::lazy_static;
use regex::Regex;

/// Backward spellings of "Amount", "Page", "Payment", "Printed", "Number".
pub const REVERSAL_MARKERS: &[&str] = &["tnuoma", "egap", "tnemyap", "detnirp", "rebmun"];

/// Column keywords of a claim detail table header.
pub const HEADER_KEYWORDS: &[&str] = &[
    "SERVICE",
    "PL",
    "NUM.",
    "SUBMITTED",
    "NEGOTIATED",
    "COPAY",
    "NOT",
    "DEDUCTIBLE",
    "INSURANCE",
    "PATIENT",
    "PAYABLE",
    "DATES",
    "CODE",
];

/// Words on the second header line of a claim table.
pub const HEADER_FOLLOWUP_MARKERS: &[&str] = &["dates", "code"];

/// Words on the closing line of a claim table.
pub const TOTALS_MARKERS: &[&str] = &["total", "totals"];

/// Words that flag a trace number/amount line, including mirrored fragments.
pub const TRACE_MARKERS: &[&str] = &["trace", "trace :", "trace:", "tnuom", "tnuoma"];

/// Words that flag the printed-date line.
pub const PRINTED_MARKERS: &[&str] = &["printed", "detnirp", "asu :"];

lazy_static! {
    // Amount-looking token: optional dollar sign, at least three digit/separator chars
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"[$]?\s*[0-9][0-9,.]{1,}\d"
    ).unwrap();

    // Everything an amount token sheds before parsing
    pub static ref NON_AMOUNT_CHARS: Regex = Regex::new(
        r"[^\d.,]+"
    ).unwrap();

    // Any decimal digit, ASCII or not
    pub static ref ANY_DIGIT: Regex = Regex::new(
        r"\d"
    ).unwrap();

    // Word-bounded digit run; trace numbers are runs of at least five
    pub static ref DIGIT_RUN: Regex = Regex::new(
        r"\b\d+\b"
    ).unwrap();

    // Slash date with loose component widths (printed date)
    pub static ref SLASH_DATE: Regex = Regex::new(
        r"\d{1,4}/\d{1,4}/\d{1,4}"
    ).unwrap();

    // Service row: date, procedure code, billed amount
    pub static ref SERVICE_ROW: Regex = Regex::new(
        r"\b\d{1,2}/\d{1,2}/\d{2,4}\b.*?\b[A-Z0-9]{5,}\b.*?\b[$]?\s*\d[\d,.]{1,}\d\b"
    ).unwrap();

    // "Page 1 of 3", "Page: 2/4"
    pub static ref PAGE_LABELED: Regex = Regex::new(
        r"(?i)page\s*\D*(\d+)\s*(?:of|/)\s*(\d+)"
    ).unwrap();

    // "1 of 3"
    pub static ref PAGE_OF: Regex = Regex::new(
        r"(?i)(\d+)\s*of\s*(\d+)"
    ).unwrap();

    // "1of3"
    pub static ref PAGE_COMPACT: Regex = Regex::new(
        r"(?i)(\d+)of(\d+)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_row_pattern() {
        assert!(SERVICE_ROW.is_match("01/02/2024 ABC1234 $150.00"));
        assert!(SERVICE_ROW.is_match("12/31/24 99213 NEGOTIATED 1,250.00 0.00"));
        assert!(!SERVICE_ROW.is_match("01/02/2024 ABC $150.00"));
        assert!(!SERVICE_ROW.is_match("ABC1234 $150.00"));
    }

    #[test]
    fn test_page_patterns() {
        assert_eq!(&PAGE_LABELED.captures("Page 2 of 5").unwrap()[2], "5");
        assert_eq!(&PAGE_LABELED.captures("PAGE: 1/3").unwrap()[2], "3");
        assert_eq!(&PAGE_OF.captures("sheet 1 of 4").unwrap()[2], "4");
        assert_eq!(&PAGE_COMPACT.captures("1of7").unwrap()[2], "7");
    }
}
