//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{RemitError, Result};
use crate::remittance::rules::patterns;

/// Main configuration for the remit pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemitConfig {
    /// PDF text extraction configuration.
    pub pdf: PdfConfig,

    /// Heuristic field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Batch processing configuration.
    pub batch: BatchConfig,
}

/// Text extraction backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PdfBackend {
    /// pdf-extract, whole-document layout text.
    #[default]
    PdfExtract,
    /// lopdf, page-by-page content stream text.
    Lopdf,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Backend tried first.
    pub primary: PdfBackend,

    /// Try the empty user password on encrypted documents.
    pub decrypt_with_empty_password: bool,

    /// Retry with lopdf when a pdf-extract primary fails.
    pub use_fallback_extractor: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            primary: PdfBackend::PdfExtract,
            decrypt_with_empty_password: true,
            use_fallback_extractor: true,
        }
    }
}

/// Marker sets and thresholds used by the line heuristics.
///
/// Markers are matched as case-insensitive substrings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Backward spellings that flag a character-reversed line.
    pub reversal_markers: Vec<String>,

    /// Column keywords of a claim table header.
    pub header_keywords: Vec<String>,

    /// Minimum number of header keywords on a header line.
    pub min_header_keywords: usize,

    /// Words expected on the line right after a header.
    pub header_followup_markers: Vec<String>,

    /// Words that close a claim block.
    pub totals_markers: Vec<String>,

    /// Words that flag a trace number/amount line.
    pub trace_markers: Vec<String>,

    /// Words that flag a printed-date line.
    pub printed_markers: Vec<String>,

    /// Lines searched before a trace line.
    pub trace_window_before: usize,

    /// Lines searched after a trace line.
    pub trace_window_after: usize,

    /// Minimum trimmed length of a practice-name line.
    pub min_practice_name_len: usize,

    /// Minimum word count of a practice-name line.
    pub min_practice_name_words: usize,

    /// Minimum digit run accepted as a trace number.
    pub min_long_numeric_len: usize,
}

fn owned(markers: &[&str]) -> Vec<String> {
    markers.iter().map(|m| (*m).to_string()).collect()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            reversal_markers: owned(patterns::REVERSAL_MARKERS),
            header_keywords: owned(patterns::HEADER_KEYWORDS),
            min_header_keywords: 4,
            header_followup_markers: owned(patterns::HEADER_FOLLOWUP_MARKERS),
            totals_markers: owned(patterns::TOTALS_MARKERS),
            trace_markers: owned(patterns::TRACE_MARKERS),
            printed_markers: owned(patterns::PRINTED_MARKERS),
            trace_window_before: 2,
            trace_window_after: 2,
            min_practice_name_len: 4,
            min_practice_name_words: 2,
            min_long_numeric_len: 5,
        }
    }
}

/// Batch processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of documents processed concurrently.
    pub jobs: usize,

    /// Keep going after a document fails.
    pub continue_on_error: bool,

    /// Payer label used when the caller does not name one.
    pub default_insurance_name: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            jobs: 4,
            continue_on_error: true,
            default_insurance_name: "Aetna".to_string(),
        }
    }
}

impl RemitConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&content).map_err(|e| RemitError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| RemitError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the heuristics cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.batch.jobs == 0 {
            return Err(RemitError::Config("batch.jobs must be at least 1".to_string()));
        }
        if self.extraction.min_header_keywords == 0 {
            return Err(RemitError::Config(
                "extraction.min_header_keywords must be at least 1".to_string(),
            ));
        }
        if self.extraction.totals_markers.iter().all(|m| m.trim().is_empty()) {
            return Err(RemitError::Config(
                "extraction.totals_markers must contain a non-empty marker".to_string(),
            ));
        }
        Ok(())
    }
}
