//! Numeric token parsing for trace amounts and trace numbers.
//!
//! Extraction sometimes mirrors a whole line, so every amount token is read
//! twice: as printed and character-reversed. When both readings parse, the
//! larger value is taken. This is a heuristic with no correctness guarantee;
//! a legitimately smaller forward reading loses to a larger mirrored one.

use rust_decimal::Decimal;
use tracing::trace;

use super::patterns::{AMOUNT_TOKEN, DIGIT_RUN, NON_AMOUNT_CHARS};

/// Default minimum digit run for a trace number.
pub const MIN_LONG_NUMERIC_LEN: usize = 5;

/// Which reading of a token produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    /// The token as it appears in the line.
    AsRead,
    /// The token's characters reversed.
    Reversed,
}

/// A finite numeric reading of a token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountCandidate {
    pub value: f64,
    pub reading: Reading,
}

impl AmountCandidate {
    pub fn new(value: f64, reading: Reading) -> Self {
        Self { value, reading }
    }
}

/// Strip currency noise from a numeric substring.
///
/// Removes `$`, `USD`, spaces and commas. When several periods remain only
/// the last one is kept as the decimal point.
pub fn normalize_numeric_text(raw: &str) -> String {
    let s = raw
        .trim()
        .replace('$', "")
        .replace("USD", "")
        .replace(' ', "")
        .replace(',', "");

    match s.rsplit_once('.') {
        Some((head, tail)) if head.contains('.') => format!("{}.{}", head.replace('.', ""), tail),
        _ => s,
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Pick between the as-read and reversed readings.
///
/// The larger value wins; the as-read candidate wins a tie.
pub fn select_candidate(
    as_read: Option<AmountCandidate>,
    reversed: Option<AmountCandidate>,
) -> Option<AmountCandidate> {
    match (as_read, reversed) {
        (Some(a), Some(r)) => Some(if r.value > a.value { r } else { a }),
        (a, r) => a.or(r),
    }
}

/// Parse a token as-read and reversed, keeping the preferred finite reading.
pub fn parse_amount_candidates(token: &str) -> Option<AmountCandidate> {
    let as_read = parse_finite(&normalize_numeric_text(token))
        .map(|v| AmountCandidate::new(v, Reading::AsRead));

    let mirrored: String = token.chars().rev().collect();
    let reversed = parse_finite(&normalize_numeric_text(&mirrored))
        .map(|v| AmountCandidate::new(v, Reading::Reversed));

    select_candidate(as_read, reversed)
}

fn to_cents(value: f64) -> Option<Decimal> {
    let mut amount = Decimal::from_f64_retain(value)?.round_dp(2);
    amount.rescale(2);
    Some(amount)
}

/// First amount-looking token on the line that parses, rounded to cents.
///
/// Scanning stops at the first token with a finite reading. If that value has
/// no `Decimal` form the line yields no amount; later tokens are not tried.
pub fn extract_amount_from_line(line: &str) -> Option<Decimal> {
    let (token, candidate) = AMOUNT_TOKEN.find_iter(line).find_map(|token| {
        let cleaned = NON_AMOUNT_CHARS.replace_all(token.as_str(), "");
        parse_amount_candidates(&cleaned).map(|candidate| (token, candidate))
    })?;

    let amount = to_cents(candidate.value);
    trace!("amount {:?} ({:?}) from token {:?}", amount, candidate.reading, token.as_str());
    amount
}

/// First word-bounded run of at least `min_len` digits.
pub fn extract_digit_run(line: &str, min_len: usize) -> Option<String> {
    DIGIT_RUN
        .find_iter(line)
        .map(|m| m.as_str())
        .find(|run| run.chars().count() >= min_len)
        .map(str::to_string)
}

/// First word-bounded run of five or more digits.
pub fn extract_long_numeric_token(line: &str) -> Option<String> {
    extract_digit_run(line, MIN_LONG_NUMERIC_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_numeric_text() {
        assert_eq!(normalize_numeric_text("$1,234.56"), "1234.56");
        assert_eq!(normalize_numeric_text("1 234.56"), "1234.56");
        assert_eq!(normalize_numeric_text("1.234.56"), "1234.56");
        assert_eq!(normalize_numeric_text("  USD 99.00 "), "99.00");
        assert_eq!(normalize_numeric_text("12"), "12");
    }

    #[test]
    fn test_no_digits_has_no_candidate() {
        assert_eq!(parse_amount_candidates("abc"), None);
        assert_eq!(parse_amount_candidates("$,."), None);
        assert_eq!(parse_amount_candidates(""), None);
    }

    #[test]
    fn test_larger_reading_wins() {
        let picked = select_candidate(
            Some(AmountCandidate::new(10.0, Reading::AsRead)),
            Some(AmountCandidate::new(100.0, Reading::Reversed)),
        )
        .unwrap();
        assert_eq!(picked.value, 100.0);
        assert_eq!(picked.reading, Reading::Reversed);
    }

    #[test]
    fn test_tie_goes_to_as_read() {
        let picked = parse_amount_candidates("1.1").unwrap();
        assert_eq!(picked.value, 1.1);
        assert_eq!(picked.reading, Reading::AsRead);
    }

    #[test]
    fn test_forward_reading_kept_when_larger() {
        let picked = parse_amount_candidates("12.00").unwrap();
        assert_eq!(picked.value, 12.0);
        assert_eq!(picked.reading, Reading::AsRead);
    }

    #[test]
    fn test_mirrored_reading_can_win_over_correct_one() {
        // "12.34" read backwards is 43.21, which is larger
        let picked = parse_amount_candidates("12.34").unwrap();
        assert_eq!(picked.value, 43.21);
        assert_eq!(picked.reading, Reading::Reversed);

        assert_eq!(parse_amount_candidates("0010").unwrap().value, 100.0);
    }

    #[test]
    fn test_single_finite_reading() {
        // reversed "5." is ".5", still finite; as-read 5.0 is larger
        assert_eq!(parse_amount_candidates("5.").unwrap().value, 5.0);
    }

    #[test]
    fn test_extract_amount_from_line() {
        assert_eq!(extract_amount_from_line("Trace Amount: $532.10"), Some(dec("532.10")));
        assert_eq!(extract_amount_from_line("Paid 1,250.00 USD"), Some(dec("1250.00")));
        assert_eq!(extract_amount_from_line("no money here"), None);
        assert_eq!(extract_amount_from_line("a 12 b"), None);
    }

    #[test]
    fn test_first_token_on_line_wins() {
        assert_eq!(
            extract_amount_from_line("Paid $10.00 of billed $20.00"),
            Some(dec("10.00"))
        );
    }

    #[test]
    fn test_unrepresentable_first_token_stops_scan() {
        // 1.2e29 parses as f64 but exceeds Decimal; the later $5.00 is not used
        let line = "Trace Amount: $123456789012345678901234567890.00 adj $5.00";
        assert!(parse_amount_candidates("123456789012345678901234567890.00").is_some());
        assert_eq!(extract_amount_from_line(line), None);
    }

    #[test]
    fn test_extract_amount_rounds_to_cents() {
        let amount = extract_amount_from_line("Total 987.126").unwrap();
        assert_eq!(amount.to_string(), "987.13");
    }

    #[test]
    fn test_extract_amount_scale_is_two() {
        let amount = extract_amount_from_line("Trace Amount: $800.00").unwrap();
        assert_eq!(amount.to_string(), "800.00");
    }

    #[test]
    fn test_extract_long_numeric_token() {
        assert_eq!(
            extract_long_numeric_token("Trace 8812345678 end"),
            Some("8812345678".to_string())
        );
        assert_eq!(extract_long_numeric_token("Claim 1234 of 99"), None);
        assert_eq!(extract_long_numeric_token("ref A123456"), None);
        assert_eq!(
            extract_long_numeric_token("1234 then 55555 then 666666"),
            Some("55555".to_string())
        );
    }

    #[test]
    fn test_extract_digit_run_width() {
        assert_eq!(extract_digit_run("check 123456", 6), Some("123456".to_string()));
        assert_eq!(extract_digit_run("check 12345", 6), None);
    }
}
