//! Fallback text extraction and page counting using lopdf.

use lopdf::Document;
use tracing::{debug, trace};

use super::{split_lines, PageCounter, Result, TextExtractor};
use crate::error::PdfError;

/// Page-by-page text extractor backed by lopdf.
///
/// Each call parses the bytes afresh, so one instance can serve many
/// documents concurrently.
#[derive(Debug, Clone)]
pub struct LopdfExtractor {
    decrypt_with_empty_password: bool,
}

impl LopdfExtractor {
    /// Create a new extractor that tries the empty password on encrypted files.
    pub fn new() -> Self {
        Self {
            decrypt_with_empty_password: true,
        }
    }

    /// Set whether encrypted documents are opened with the empty password.
    pub fn with_empty_password_decryption(mut self, enabled: bool) -> Self {
        self.decrypt_with_empty_password = enabled;
        self
    }

    fn load(&self, data: &[u8]) -> Result<Document> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if !self.decrypt_with_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        Ok(doc)
    }
}

impl Default for LopdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for LopdfExtractor {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract_lines(&self, data: &[u8]) -> Result<Vec<String>> {
        let doc = self.load(data)?;
        let pages = doc.get_pages();
        if pages.is_empty() {
            return Err(PdfError::NoPages);
        }

        let mut lines = Vec::new();
        for page_num in pages.keys() {
            let text = doc
                .extract_text(&[*page_num])
                .map_err(|e| PdfError::TextExtraction(format!("page {}: {}", page_num, e)))?;
            let page_lines = split_lines(&text);
            trace!("lopdf page {}: {} lines", page_num, page_lines.len());
            lines.extend(page_lines);
        }

        debug!("lopdf extracted {} lines from {} pages", lines.len(), pages.len());
        Ok(lines)
    }
}

impl PageCounter for LopdfExtractor {
    fn page_count(&self, data: &[u8]) -> Result<u64> {
        let doc = self.load(data)?;
        let count = doc.get_pages().len();
        if count == 0 {
            return Err(PdfError::NoPages);
        }
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::write_text_pdf;

    fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
        write_text_pdf(pages).unwrap()
    }

    #[test]
    fn test_page_count_matches_page_tree() {
        let data = build_pdf(&[&["first page"], &["second page"], &["third page"]]);
        assert_eq!(LopdfExtractor::new().page_count(&data).unwrap(), 3);
    }

    #[test]
    fn test_extracts_lines_across_pages() {
        let data = build_pdf(&[&["ACME MEDICAL GROUP"], &["Trace Number 8812345678"]]);
        let lines = LopdfExtractor::new().extract_lines(&data).unwrap();

        assert!(lines.iter().any(|l| l.contains("ACME MEDICAL GROUP")));
        assert!(lines.iter().any(|l| l.contains("8812345678")));
    }

    #[test]
    fn test_invalid_bytes_are_parse_errors() {
        let err = LopdfExtractor::new().page_count(b"%PDF-garbage").unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }
}
