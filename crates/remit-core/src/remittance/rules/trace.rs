//! Trace number and trace amount locator.

use rust_decimal::Decimal;

use super::amounts::{extract_amount_from_line, extract_digit_run, MIN_LONG_NUMERIC_LEN};
use super::markers::MarkerSet;
use super::patterns::TRACE_MARKERS;
use super::LineMatch;

/// Trace fields found in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceFields {
    /// Trace (check) number.
    pub check_number: Option<LineMatch<String>>,
    /// Trace (check) amount, in cents precision.
    pub check_amount: Option<LineMatch<Decimal>>,
}

impl TraceFields {
    pub fn is_complete(&self) -> bool {
        self.check_number.is_some() && self.check_amount.is_some()
    }

    fn fill_from(&mut self, line: &str, idx: usize, min_digits: usize) {
        if self.check_amount.is_none() {
            self.check_amount = extract_amount_from_line(line).map(|a| LineMatch::new(a, idx));
        }
        if self.check_number.is_none() {
            self.check_number = extract_digit_run(line, min_digits).map(|n| LineMatch::new(n, idx));
        }
    }
}

/// Scans trace-marker lines, then their neighbours, for the trace fields.
///
/// Each field keeps its first hit. For a marker line at `idx` the line itself
/// is searched first, then the window `[idx - before, idx + after]` in order.
#[derive(Debug, Clone)]
pub struct TraceLocator {
    markers: MarkerSet,
    before: usize,
    after: usize,
    min_digits: usize,
}

impl TraceLocator {
    pub fn new(markers: MarkerSet) -> Self {
        Self {
            markers,
            before: 2,
            after: 2,
            min_digits: MIN_LONG_NUMERIC_LEN,
        }
    }

    /// Set how many lines around a marker line are searched.
    pub fn with_window(mut self, before: usize, after: usize) -> Self {
        self.before = before;
        self.after = after;
        self
    }

    /// Set the minimum digit run accepted as a trace number.
    pub fn with_min_digits(mut self, min_digits: usize) -> Self {
        self.min_digits = min_digits;
        self
    }

    pub fn locate<S: AsRef<str>>(&self, lines: &[S]) -> TraceFields {
        let mut fields = TraceFields::default();

        for (idx, line) in lines.iter().enumerate() {
            if fields.is_complete() {
                break;
            }
            let line = line.as_ref();
            if !self.markers.matches(line) {
                continue;
            }

            fields.fill_from(line, idx, self.min_digits);

            let start = idx.saturating_sub(self.before);
            let end = idx.saturating_add(self.after).saturating_add(1).min(lines.len());
            for (offset, neighbour) in lines[start..end].iter().enumerate() {
                if fields.is_complete() {
                    break;
                }
                fields.fill_from(neighbour.as_ref(), start + offset, self.min_digits);
            }
        }

        fields
    }
}

impl Default for TraceLocator {
    fn default() -> Self {
        Self::new(MarkerSet::new(TRACE_MARKERS))
    }
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
    fn test_fields_from_marker_line_and_neighbour() {
        let lines = ["ACME MEDICAL GROUP", "Trace Amount: $1,204.55", "EFT 8812345678"];
        let fields = TraceLocator::default().locate(&lines);

        assert_eq!(fields.check_amount, Some(LineMatch::new(dec("1204.55"), 1)));
        assert_eq!(fields.check_number, Some(LineMatch::new("8812345678".to_string(), 2)));
    }

    #[test]
    fn test_neighbour_window_fills_missing_fields() {
        let lines = [
            "Payment Summary",
            "Amount paid",
            "Trace Number:",
            "$96.40",
            "0001234567",
            "$12.00",
        ];
        let fields = TraceLocator::default().locate(&lines);

        assert_eq!(fields.check_amount.unwrap(), LineMatch::new(dec("96.40"), 3));
        assert_eq!(fields.check_number.unwrap().value, "0001234567");
    }

    #[test]
    fn test_window_does_not_reach_past_two_lines() {
        let lines = ["Trace:", "a", "b", "77777"];
        let fields = TraceLocator::default().locate(&lines);
        assert_eq!(fields.check_number, None);

        let wider = TraceLocator::default().with_window(2, 3).locate(&lines);
        assert_eq!(wider.check_number.unwrap().value, "77777");
    }

    #[test]
    fn test_first_found_wins() {
        let lines = [
            "Trace Amount: $10.00",
            "Check 11111111",
            "filler",
            "filler",
            "filler",
            "Trace Amount: $20.00",
            "Check 22222222",
        ];
        let fields = TraceLocator::default().locate(&lines);

        assert_eq!(fields.check_number.unwrap().value, "11111111");
        assert_eq!(fields.check_amount.unwrap().value, dec("10.00"));
    }

    #[test]
    fn test_reversed_fragment_marker() {
        // normalization missed this line; "tnuom" still flags it
        let lines = ["xtnuom 55555"];
        let fields = TraceLocator::default().locate(&lines);
        assert_eq!(fields.check_number.unwrap().value, "55555");
    }

    #[test]
    fn test_no_marker_no_fields() {
        let lines = ["Check 8812345678", "$532.10"];
        assert_eq!(TraceLocator::default().locate(&lines), TraceFields::default());
    }
}
