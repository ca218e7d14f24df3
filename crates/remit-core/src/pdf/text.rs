//! Primary text extraction via pdf-extract.

use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use super::{split_lines, Result, TextExtractor};
use crate::error::PdfError;

const BACKEND: &str = "pdf-extract";

/// Whole-document text extraction using `pdf_extract`.
///
/// pdf-extract panics on some malformed inputs; those panics are caught and
/// reported as [`PdfError::Panicked`] so the fallback extractor gets a turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractBackend;

impl PdfExtractBackend {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfExtractBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn extract_lines(&self, data: &[u8]) -> Result<Vec<String>> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(data)
        }));

        let text = match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return Err(PdfError::TextExtraction(e.to_string())),
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                return Err(PdfError::Panicked {
                    backend: BACKEND,
                    message,
                });
            }
        };

        let lines = split_lines(&text);
        debug!("{} extracted {} lines", BACKEND, lines.len());
        Ok(lines)
    }
}
