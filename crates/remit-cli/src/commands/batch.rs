//! Batch processing command for many remittance PDFs.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use remit_core::remittance::process_document;
use remit_core::{
    BatchOutcome, BatchPolicy, BatchReport, ExtractionPipeline, RawDocument, RemitError,
};

use super::process::{format_csv, format_text, OutputFormat};
use super::{is_pdf, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Write a timestamped result file into this directory
    #[arg(short = 'd', long)]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Payer name written to every record (default: from config)
    #[arg(short, long)]
    insurance: Option<String>,

    /// Also write a per-file status CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Number of parallel workers (default: from config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Stop at the first failed file without writing results
    #[arg(long)]
    fail_fast: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = collect_inputs(&args.inputs)?;
    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let jobs = args.jobs.unwrap_or(config.batch.jobs).max(1);
    let policy = BatchPolicy::from_continue_flag(config.batch.continue_on_error && !args.fail_fast);
    let insurance = args
        .insurance
        .clone()
        .unwrap_or_else(|| config.batch.default_insurance_name.clone());
    info!("Processing {} files with {} workers", files.len(), jobs);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let pipeline = Arc::new(ExtractionPipeline::from_config(&config));
    let report = run_concurrent(pipeline, files, insurance, jobs, policy, pb.clone()).await?;
    pb.finish_and_clear();

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &report)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    if policy == BatchPolicy::StopOnError {
        if let Some((name, err)) = report.failures().next() {
            anyhow::bail!("Processing failed for {}: {}", name, err);
        }
    }

    let results: Vec<_> = report.results().cloned().collect();
    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&results)?,
        OutputFormat::Csv => format_csv(&results)?,
        OutputFormat::Text => results
            .iter()
            .map(format_text)
            .collect::<Vec<_>>()
            .join("\n"),
    };

    let output_path = args.output.clone().or_else(|| {
        args.output_dir.as_ref().map(|dir| {
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            dir.join(format!("remittance_{}.{}", stamp, args.format.extension()))
        })
    });

    match &output_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &output)?;
            eprintln!("{} Results written to {}", style("✓").green(), path.display());
        }
        None => println!("{}", output.trim_end()),
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.outcomes.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(report.succeeded()).green(),
        style(report.failed()).red()
    );

    if report.failed() > 0 {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for (name, err) in report.failures() {
            eprintln!("  - {}: {}", name, err);
        }
    }

    Ok(())
}

/// Expand patterns into PDF paths, keeping first-seen order.
///
/// Explicit non-PDF paths are rejected; glob matches are filtered to PDFs.
fn collect_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for input in inputs {
        let literal = Path::new(input);
        if literal.is_file() {
            if !is_pdf(literal) {
                anyhow::bail!("File {} is not a PDF", literal.display());
            }
            if !files.iter().any(|f| f == literal) {
                files.push(literal.to_path_buf());
            }
            continue;
        }

        let mut matched: Vec<PathBuf> = glob(input)?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file() && is_pdf(p))
            .collect();
        matched.sort();
        for path in matched {
            if !files.contains(&path) {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        anyhow::bail!("No matching PDF files found for: {}", inputs.join(" "));
    }

    Ok(files)
}

/// Process files on blocking workers, at most `jobs` at a time, in input order.
///
/// Under `StopOnError` no new file starts once one has failed, and the report
/// ends at the first failure in input order.
async fn run_concurrent(
    pipeline: Arc<ExtractionPipeline>,
    files: Vec<PathBuf>,
    insurance: String,
    jobs: usize,
    policy: BatchPolicy,
    pb: ProgressBar,
) -> anyhow::Result<BatchReport> {
    let semaphore = Arc::new(Semaphore::new(jobs));
    let stop = Arc::new(AtomicBool::new(false));
    let mut handles = Vec::with_capacity(files.len());

    for path in files {
        let permit = semaphore.clone().acquire_owned().await?;
        if stop.load(Ordering::SeqCst) {
            break;
        }
        let pipeline = pipeline.clone();
        let insurance = insurance.clone();
        let stop = stop.clone();
        let pb = pb.clone();

        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            if stop.load(Ordering::SeqCst) {
                return None;
            }
            let outcome = match RawDocument::from_path(&path, insurance) {
                Ok(doc) => process_document(&pipeline, &doc),
                Err(e) => BatchOutcome {
                    filename: path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    result: Err(RemitError::from(e)),
                    processing_time_ms: 0,
                },
            };
            debug!("{} done in {}ms", outcome.filename, outcome.processing_time_ms);
            if !outcome.is_success() && policy == BatchPolicy::StopOnError {
                warn!("Stopping batch after failure in {}", outcome.filename);
                stop.store(true, Ordering::SeqCst);
            }
            pb.inc(1);
            Some(outcome)
        }));
    }

    let mut report = BatchReport::default();
    for handle in handles {
        if let Some(outcome) = handle.await? {
            report.outcomes.push(outcome);
        }
    }

    if policy == BatchPolicy::StopOnError {
        if let Some(first_failure) = report.outcomes.iter().position(|o| !o.is_success()) {
            report.outcomes.truncate(first_failure + 1);
        }
    }
    Ok(report)
}

fn write_summary(path: &Path, report: &BatchReport) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["filename", "status", "processing_time_ms", "error"])?;

    for outcome in &report.outcomes {
        let time = outcome.processing_time_ms.to_string();
        let (status, error) = match &outcome.result {
            Ok(_) => ("success", String::new()),
            Err(e) => ("error", e.to_string()),
        };
        wtr.write_record([
            outcome.filename.as_str(),
            status,
            time.as_str(),
            error.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
