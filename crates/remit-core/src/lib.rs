//! Core library for remittance (EOB) PDF extraction.
//!
//! This crate provides:
//! - PDF text collaborators (pdf-extract primary, lopdf fallback and page count)
//! - Line normalization for character-reversed extraction output
//! - Heuristic locators for practice name, trace number/amount, printed date
//!   and page count
//! - Claim block scanning with a document-wide fallback count
//! - A per-document pipeline and a batch driver producing export records

pub mod error;
pub mod models;
pub mod pdf;
pub mod remittance;

pub use error::{ExtractionError, PdfError, RemitError, Result};
pub use models::config::RemitConfig;
pub use models::remittance::{ExtractionResult, RawDocument, EXPORT_COLUMNS};
pub use pdf::{LopdfExtractor, PageCounter, PdfExtractBackend, TextExtractor};
pub use remittance::{
    process_batch, BatchOutcome, BatchPolicy, BatchReport, ExtractionPipeline, ParsedRemittance,
    RemittanceParser,
};
