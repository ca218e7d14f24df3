//! Data models for remittance extraction.

pub mod config;
pub mod remittance;

pub use config::{BatchConfig, ExtractionConfig, PdfBackend, PdfConfig, RemitConfig};
pub use remittance::{ExtractionResult, RawDocument, EXPORT_COLUMNS};
