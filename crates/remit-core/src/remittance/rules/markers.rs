//! Case-insensitive marker word sets.

use crate::models::config::ExtractionConfig;

use super::patterns;

/// A set of lowercase marker substrings.
///
/// Empty markers are dropped on construction; an empty substring would
/// otherwise match every line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerSet {
    markers: Vec<String>,
}

impl MarkerSet {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(|m| m.as_ref().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// True when the line contains any marker.
    pub fn matches(&self, line: &str) -> bool {
        self.matches_lowered(&line.to_lowercase())
    }

    /// Same as [`matches`](Self::matches) for a line that is already lowercase.
    pub fn matches_lowered(&self, lowered: &str) -> bool {
        self.markers.iter().any(|m| lowered.contains(m.as_str()))
    }

    /// Number of distinct markers contained in the line.
    pub fn count_matches(&self, line: &str) -> usize {
        let lowered = line.to_lowercase();
        self.markers
            .iter()
            .filter(|m| lowered.contains(m.as_str()))
            .count()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Every marker set the heuristics consult.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSets {
    pub reversal: MarkerSet,
    pub header_keywords: MarkerSet,
    pub header_followup: MarkerSet,
    pub totals: MarkerSet,
    pub trace: MarkerSet,
    pub printed: MarkerSet,
}

impl Default for MarkerSets {
    fn default() -> Self {
        Self {
            reversal: MarkerSet::new(patterns::REVERSAL_MARKERS),
            header_keywords: MarkerSet::new(patterns::HEADER_KEYWORDS),
            header_followup: MarkerSet::new(patterns::HEADER_FOLLOWUP_MARKERS),
            totals: MarkerSet::new(patterns::TOTALS_MARKERS),
            trace: MarkerSet::new(patterns::TRACE_MARKERS),
            printed: MarkerSet::new(patterns::PRINTED_MARKERS),
        }
    }
}

impl From<&ExtractionConfig> for MarkerSets {
    fn from(config: &ExtractionConfig) -> Self {
        Self {
            reversal: MarkerSet::new(&config.reversal_markers),
            header_keywords: MarkerSet::new(&config.header_keywords),
            header_followup: MarkerSet::new(&config.header_followup_markers),
            totals: MarkerSet::new(&config.totals_markers),
            trace: MarkerSet::new(&config.trace_markers),
            printed: MarkerSet::new(&config.printed_markers),
        }
    }
}
