//! Per-document extraction: PDF bytes to exported record.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{ExtractionError, PdfError, Result};
use crate::models::config::{PdfBackend, RemitConfig};
use crate::models::remittance::{ExtractionResult, RawDocument};
use crate::pdf::{LopdfExtractor, PageCounter, PdfExtractBackend, TextExtractor};

use super::parser::{ParsedRemittance, RemittanceParser};

/// Where the reported page count came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCountSource {
    /// A page marker in the text.
    Text,
    /// The PDF page tree.
    Structure,
}

/// Full outcome for one document, including diagnostics.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub result: ExtractionResult,
    pub parsed: ParsedRemittance,
    /// Name of the extractor whose lines were used.
    pub extractor: &'static str,
    pub page_count_source: PageCountSource,
}

/// Runs text extraction and the heuristics for single documents.
///
/// Holds no per-document state; share it behind an `Arc` for concurrent use.
#[derive(Clone)]
pub struct ExtractionPipeline {
    parser: RemittanceParser,
    primary: Arc<dyn TextExtractor>,
    fallback: Option<Arc<dyn TextExtractor>>,
    page_counter: Arc<dyn PageCounter>,
}

impl ExtractionPipeline {
    /// pdf-extract first, lopdf as fallback and page counter.
    pub fn new() -> Self {
        Self::from_config(&RemitConfig::default())
    }

    pub fn from_config(config: &RemitConfig) -> Self {
        let lopdf = Arc::new(
            LopdfExtractor::new()
                .with_empty_password_decryption(config.pdf.decrypt_with_empty_password),
        );

        let primary: Arc<dyn TextExtractor> = match config.pdf.primary {
            PdfBackend::PdfExtract => Arc::new(PdfExtractBackend::new()),
            PdfBackend::Lopdf => lopdf.clone(),
        };
        // lopdf never falls back to itself
        let fallback: Option<Arc<dyn TextExtractor>> =
            if config.pdf.primary == PdfBackend::PdfExtract && config.pdf.use_fallback_extractor {
                Some(lopdf.clone())
            } else {
                None
            };

        Self {
            parser: RemittanceParser::from_config(&config.extraction),
            primary,
            fallback,
            page_counter: lopdf,
        }
    }

    /// Replace the primary text extractor.
    pub fn with_primary(mut self, extractor: impl TextExtractor + 'static) -> Self {
        self.primary = Arc::new(extractor);
        self
    }

    /// Replace or disable the fallback text extractor.
    pub fn with_fallback(mut self, extractor: Option<Arc<dyn TextExtractor>>) -> Self {
        self.fallback = extractor;
        self
    }

    /// Replace the structural page counter.
    pub fn with_page_counter(mut self, counter: impl PageCounter + 'static) -> Self {
        self.page_counter = Arc::new(counter);
        self
    }

    /// Raw lines from the primary extractor, or the fallback when it fails.
    pub fn extract_lines(&self, data: &[u8]) -> Result<(Vec<String>, &'static str)> {
        let primary_err = match self.primary.extract_lines(data) {
            Ok(lines) => return Ok((lines, self.primary.name())),
            Err(e) => e,
        };

        let Some(fallback) = &self.fallback else {
            return Err(ExtractionError::Unreadable {
                primary: primary_err,
                fallback: PdfError::TextExtraction("fallback extractor disabled".to_string()),
            }
            .into());
        };

        warn!(
            "{} failed ({}), retrying with {}",
            self.primary.name(),
            primary_err,
            fallback.name()
        );

        match fallback.extract_lines(data) {
            Ok(lines) => Ok((lines, fallback.name())),
            Err(fallback_err) => Err(ExtractionError::Unreadable {
                primary: primary_err,
                fallback: fallback_err,
            }
            .into()),
        }
    }

    /// Extract one document, keeping the intermediate findings.
    pub fn process_detailed(&self, doc: &RawDocument) -> Result<ProcessedDocument> {
        info!("Processing {}", doc.filename);

        let (lines, extractor) = self.extract_lines(&doc.bytes)?;
        debug!("{}: {} lines via {}", doc.filename, lines.len(), extractor);

        let parsed = self.parser.parse_lines(lines.as_slice());
        for warning in &parsed.warnings {
            debug!("{}: {}", doc.filename, warning);
        }

        let (page_count, page_count_source) = match &parsed.page_count {
            Some(found) => (found.value, PageCountSource::Text),
            None => {
                let count = self
                    .page_counter
                    .page_count(&doc.bytes)
                    .map_err(ExtractionError::PageCount)?;
                (count, PageCountSource::Structure)
            }
        };

        let result = parsed.to_result(&doc.filename, &doc.insurance_name, page_count);
        Ok(ProcessedDocument {
            result,
            parsed,
            extractor,
            page_count_source,
        })
    }

    /// Extract one document into its exported record.
    pub fn process(&self, doc: &RawDocument) -> Result<ExtractionResult> {
        self.process_detailed(doc).map(|p| p.result)
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}
