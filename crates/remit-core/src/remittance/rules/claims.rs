//! Claim block scanner.
//!
//! A claim block is a header line (enough column keywords), a follow-up
//! header line (mentions "dates" or "code"), a body, and a totals line.
//! Service rows are counted in each body. When no block closes anywhere in
//! the document, service rows are counted over the whole document instead.

use tracing::{debug, trace};

use super::markers::MarkerSet;
use super::patterns::{HEADER_FOLLOWUP_MARKERS, HEADER_KEYWORDS, SERVICE_ROW, TOTALS_MARKERS};

/// A closed claim table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimBlock {
    /// Index of the first header line.
    pub header_index: usize,
    /// Index of the totals line; the body is `[header_index + 2, totals_index)`.
    pub totals_index: usize,
    /// Service rows inside the body.
    pub service_rows: usize,
}

/// Outcome of a claim scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSummary {
    /// Closed blocks in document order.
    pub blocks: Vec<ClaimBlock>,
    /// Document-wide service rows, computed only when no block closed.
    pub fallback_rows: Option<usize>,
}

impl ClaimSummary {
    /// Service rows across all closed blocks.
    pub fn block_rows(&self) -> usize {
        self.blocks.iter().map(|b| b.service_rows).sum()
    }

    /// Whether the document-wide count was used.
    pub fn used_fallback(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The claim count reported for the document.
    pub fn claim_count(&self) -> usize {
        if self.blocks.is_empty() {
            self.fallback_rows.unwrap_or(0)
        } else {
            self.block_rows()
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Scan,
    InBlock { header_index: usize },
}

/// Two-state scanner over normalized lines.
#[derive(Debug, Clone)]
pub struct ClaimScanner {
    header_keywords: MarkerSet,
    min_header_keywords: usize,
    header_followup: MarkerSet,
    totals: MarkerSet,
}

impl ClaimScanner {
    pub fn new(header_keywords: MarkerSet, header_followup: MarkerSet, totals: MarkerSet) -> Self {
        Self {
            header_keywords,
            min_header_keywords: 4,
            header_followup,
            totals,
        }
    }

    /// Set how many header keywords a header line needs.
    pub fn with_min_header_keywords(mut self, min: usize) -> Self {
        self.min_header_keywords = min;
        self
    }

    /// Whether a line looks like a claim table header.
    pub fn is_header(&self, line: &str) -> bool {
        self.header_keywords.count_matches(line) >= self.min_header_keywords
    }

    /// Whether a line closes a claim table.
    pub fn is_totals(&self, line: &str) -> bool {
        self.totals.matches(line)
    }

    /// Whether a line is a service row; blank lines never are.
    pub fn is_service_row(line: &str) -> bool {
        let trimmed = line.trim();
        !trimmed.is_empty() && SERVICE_ROW.is_match(trimmed)
    }

    /// Count service rows in a run of lines.
    pub fn count_service_rows<S: AsRef<str>>(lines: &[S]) -> usize {
        lines
            .iter()
            .filter(|l| Self::is_service_row(l.as_ref()))
            .count()
    }

    /// Scan for closed claim blocks.
    ///
    /// A header without a later totals line is abandoned and the scan resumes
    /// on the line after that header.
    pub fn scan_blocks<S: AsRef<str>>(&self, lines: &[S]) -> Vec<ClaimBlock> {
        let n = lines.len();
        let mut blocks = Vec::new();
        let mut state = ScanState::Scan;
        let mut i = 0;

        loop {
            match state {
                ScanState::Scan => {
                    if i + 1 >= n {
                        break;
                    }
                    if self.is_header(lines[i].as_ref())
                        && self.header_followup.matches(lines[i + 1].as_ref())
                    {
                        state = ScanState::InBlock { header_index: i };
                    } else {
                        i += 1;
                    }
                }
                ScanState::InBlock { header_index } => {
                    let body_start = header_index + 2;
                    match (body_start..n).find(|&j| self.is_totals(lines[j].as_ref())) {
                        Some(totals_index) => {
                            let service_rows =
                                Self::count_service_rows(&lines[body_start..totals_index]);
                            trace!(
                                "claim block {}..{} with {} service rows",
                                header_index, totals_index, service_rows
                            );
                            blocks.push(ClaimBlock {
                                header_index,
                                totals_index,
                                service_rows,
                            });
                            i = totals_index + 1;
                        }
                        None => {
                            trace!("header at {} never closed, abandoning", header_index);
                            i = header_index + 1;
                        }
                    }
                    state = ScanState::Scan;
                }
            }
        }

        blocks
    }

    /// Scan blocks and apply the document-wide fallback when none closed.
    pub fn scan<S: AsRef<str>>(&self, lines: &[S]) -> ClaimSummary {
        let blocks = self.scan_blocks(lines);
        let fallback_rows = blocks
            .is_empty()
            .then(|| Self::count_service_rows(lines));

        let summary = ClaimSummary {
            blocks,
            fallback_rows,
        };
        debug!(
            "claim scan: {} blocks, {} rows, fallback={}",
            summary.blocks.len(),
            summary.claim_count(),
            summary.used_fallback()
        );
        summary
    }
}

impl Default for ClaimScanner {
    fn default() -> Self {
        Self::new(
            MarkerSet::new(HEADER_KEYWORDS),
            MarkerSet::new(HEADER_FOLLOWUP_MARKERS),
            MarkerSet::new(TOTALS_MARKERS),
        )
    }
}
