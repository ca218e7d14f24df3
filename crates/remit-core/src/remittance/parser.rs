//! Line-sequence parser composing the remittance heuristics.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::remittance::ExtractionResult;

use super::rules::{
    ClaimScanner, ClaimSummary, FieldLocator, LineMatch, LineNormalizer, MarkerSets,
    PageCountLocator, PracticeNameLocator, PrintedDateLocator, TraceFields, TraceLocator,
};

/// Everything the heuristics found in one document's lines.
#[derive(Debug, Clone)]
pub struct ParsedRemittance {
    /// Lines after reversal repair; all indices below refer to this sequence.
    pub normalized_lines: Vec<String>,
    /// Indices of lines that were reversed.
    pub reversed_lines: Vec<usize>,
    pub practice_name: Option<LineMatch<String>>,
    /// Page total read from the text, if any line carried a page marker.
    pub page_count: Option<LineMatch<u64>>,
    pub trace: TraceFields,
    pub printed_date: Option<LineMatch<String>>,
    pub claims: ClaimSummary,
    /// Fields that fell back to their empty defaults.
    pub warnings: Vec<String>,
}

impl ParsedRemittance {
    pub fn check_amount(&self) -> Option<Decimal> {
        self.trace.check_amount.as_ref().map(|m| m.value)
    }

    /// Build the exported record with the resolved page count.
    pub fn to_result(
        &self,
        file_name: impl Into<String>,
        insurance_name: impl Into<String>,
        page_count: u64,
    ) -> ExtractionResult {
        ExtractionResult {
            file_name: file_name.into(),
            insurance_name: insurance_name.into(),
            practice_name: value_or_default(&self.practice_name),
            check_number: value_or_default(&self.trace.check_number),
            check_date: value_or_default(&self.printed_date),
            claim_count: u32::try_from(self.claims.claim_count()).unwrap_or(u32::MAX),
            page_count,
            check_amount: self.check_amount(),
        }
    }
}

fn value_or_default(found: &Option<LineMatch<String>>) -> String {
    found.as_ref().map(|m| m.value.clone()).unwrap_or_default()
}

/// Rule-based remittance parser.
///
/// Stateless; one instance can parse any number of documents concurrently.
#[derive(Debug, Clone)]
pub struct RemittanceParser {
    normalizer: LineNormalizer,
    practice: PracticeNameLocator,
    pages: PageCountLocator,
    trace: TraceLocator,
    printed: PrintedDateLocator,
    claims: ClaimScanner,
}

impl RemittanceParser {
    /// Create a parser with the built-in marker sets.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let markers = MarkerSets::from(config);
        Self {
            normalizer: LineNormalizer::new(markers.reversal),
            practice: PracticeNameLocator::new()
                .with_min_len(config.min_practice_name_len)
                .with_min_words(config.min_practice_name_words),
            pages: PageCountLocator::new(),
            trace: TraceLocator::new(markers.trace)
                .with_window(config.trace_window_before, config.trace_window_after)
                .with_min_digits(config.min_long_numeric_len),
            printed: PrintedDateLocator::new(markers.printed),
            claims: ClaimScanner::new(
                markers.header_keywords,
                markers.header_followup,
                markers.totals,
            )
            .with_min_header_keywords(config.min_header_keywords),
        }
    }

    /// Run every heuristic over the raw extracted lines.
    pub fn parse_lines<S: AsRef<str>>(&self, raw_lines: &[S]) -> ParsedRemittance {
        let reversed_lines: Vec<usize> = raw_lines
            .iter()
            .enumerate()
            .filter(|(_, l)| self.normalizer.is_reversed(l.as_ref()))
            .map(|(i, _)| i)
            .collect();
        let normalized_lines = self.normalizer.normalize_all(raw_lines);

        let lines = normalized_lines.as_slice();
        let practice_name = self.practice.locate(lines);
        let page_count = self.pages.locate(lines);
        let trace = self.trace.locate(lines);
        let printed_date = self.printed.locate(lines);
        let claims = self.claims.scan(lines);

        let mut warnings = Vec::new();
        if practice_name.is_none() {
            warnings.push("practice name not found".to_string());
        }
        if trace.check_number.is_none() {
            warnings.push("trace number not found".to_string());
        }
        if trace.check_amount.is_none() {
            warnings.push("trace amount not found".to_string());
        }
        if printed_date.is_none() {
            warnings.push("printed date not found".to_string());
        }
        if page_count.is_none() {
            warnings.push("no page marker in text".to_string());
        }
        if claims.used_fallback() {
            warnings.push("no closed claim block, counted service rows document-wide".to_string());
        }

        debug!(
            "parsed {} lines ({} reversed), {} warnings",
            normalized_lines.len(),
            reversed_lines.len(),
            warnings.len()
        );

        ParsedRemittance {
            normalized_lines,
            reversed_lines,
            practice_name,
            page_count,
            trace,
            printed_date,
            claims,
            warnings,
        }
    }
}

impl Default for RemittanceParser {
    fn default() -> Self {
        Self::new()
    }
}
