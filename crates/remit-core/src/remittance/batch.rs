//! Sequential batch driver.

use std::time::Instant;

use tracing::{info, warn};

use crate::error::RemitError;
use crate::models::remittance::{ExtractionResult, RawDocument};

use super::pipeline::ExtractionPipeline;

/// What to do after a document fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPolicy {
    /// Record the failure and keep going.
    ContinueOnError,
    /// Stop after the first failure.
    StopOnError,
}

impl BatchPolicy {
    pub fn from_continue_flag(continue_on_error: bool) -> Self {
        if continue_on_error {
            Self::ContinueOnError
        } else {
            Self::StopOnError
        }
    }
}

/// Result of one document in a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    pub filename: String,
    pub result: Result<ExtractionResult, RemitError>,
    pub processing_time_ms: u64,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    /// Records of the documents that succeeded, in input order.
    pub fn results(&self) -> impl Iterator<Item = &ExtractionResult> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Failed documents and their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &RemitError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.filename.as_str(), e)))
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Run one document through the pipeline, timing it.
pub fn process_document(pipeline: &ExtractionPipeline, doc: &RawDocument) -> BatchOutcome {
    let start = Instant::now();
    let result = pipeline.process(doc);
    let processing_time_ms = start.elapsed().as_millis() as u64;

    if let Err(e) = &result {
        warn!("Failed to process {}: {}", doc.filename, e);
    }

    BatchOutcome {
        filename: doc.filename.clone(),
        result,
        processing_time_ms,
    }
}

/// Process documents one after another, in input order.
pub fn process_batch(
    pipeline: &ExtractionPipeline,
    docs: &[RawDocument],
    policy: BatchPolicy,
) -> BatchReport {
    info!("Processing batch of {} documents", docs.len());
    let mut report = BatchReport::default();

    for doc in docs {
        let outcome = process_document(pipeline, doc);
        let failed = !outcome.is_success();
        report.outcomes.push(outcome);

        if failed && policy == BatchPolicy::StopOnError {
            warn!("Stopping batch after failure in {}", doc.filename);
            break;
        }
    }

    info!(
        "Batch complete: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
    report
}
