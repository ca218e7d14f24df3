//! Remittance extraction: heuristics, pipeline and batch driver.

pub mod batch;
mod parser;
mod pipeline;
pub mod rules;

pub use batch::{process_batch, process_document, BatchOutcome, BatchPolicy, BatchReport};
pub use parser::{ParsedRemittance, RemittanceParser};
pub use pipeline::{ExtractionPipeline, PageCountSource, ProcessedDocument};
