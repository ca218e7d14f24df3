//! Error types for the remit-core library.

use thiserror::Error;

/// Main error type for the remit library.
#[derive(Error, Debug)]
pub enum RemitError {
    /// Remittance extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the PDF text collaborators.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Failed to serialize a PDF.
    #[error("failed to write PDF: {0}")]
    Write(String),

    /// The backend aborted while reading the document.
    #[error("{backend} backend panicked: {message}")]
    Panicked {
        backend: &'static str,
        message: String,
    },
}

/// Document-level extraction failures.
///
/// Missing fields are never reported here; they resolve to empty defaults.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Neither text extractor could read the document.
    #[error("unreadable document: primary extractor failed ({primary}); fallback extractor failed ({fallback})")]
    Unreadable { primary: PdfError, fallback: PdfError },

    /// No page marker in the text and the structural page count failed.
    #[error("page count unavailable: {0}")]
    PageCount(PdfError),
}

/// Result type for the remit library.
pub type Result<T> = std::result::Result<T, RemitError>;
