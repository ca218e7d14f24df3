//! Process command - extract one remittance PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use remit_core::{ExtractionPipeline, ExtractionResult, RawDocument, EXPORT_COLUMNS};

use super::{ensure_pdf_input, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Payer name written to the record (default: from config)
    #[arg(short, long)]
    insurance: Option<String>,

    /// Show fields that fell back to empty defaults
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    ensure_pdf_input(&args.input)?;
    info!("Processing file: {}", args.input.display());

    let insurance = args
        .insurance
        .clone()
        .unwrap_or_else(|| config.batch.default_insurance_name.clone());
    let doc = RawDocument::from_path(&args.input, insurance)?;

    let pipeline = ExtractionPipeline::from_config(&config);
    let processed = pipeline.process_detailed(&doc)?;
    debug!(
        "{} lines via {}, page count from {:?}",
        processed.parsed.normalized_lines.len(),
        processed.extractor,
        processed.page_count_source
    );

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&processed.result)?,
        OutputFormat::Csv => format_csv(std::slice::from_ref(&processed.result))?,
        OutputFormat::Text => format_text(&processed.result),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    if args.show_warnings {
        for warning in &processed.parsed.warnings {
            eprintln!("{} {}", style("!").yellow(), warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Records as CSV with the export header, even when there are none.
pub fn format_csv(results: &[ExtractionResult]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    if results.is_empty() {
        wtr.write_record(EXPORT_COLUMNS)?;
    }
    for result in results {
        wtr.serialize(result)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Human-readable record.
pub fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();
    let amount = result.check_amount_text();

    output.push_str(&format!("File:       {}\n", result.file_name));
    output.push_str(&format!("Insurance:  {}\n", result.insurance_name));
    output.push_str(&format!("Practice:   {}\n", or_dash(&result.practice_name)));
    output.push_str(&format!("Check #:    {}\n", or_dash(&result.check_number)));
    output.push_str(&format!("Check date: {}\n", or_dash(&result.check_date)));
    output.push_str(&format!("Amount:     {}\n", or_dash(&amount)));
    output.push_str(&format!("Claims:     {}\n", result.claim_count));
    output.push_str(&format!("Pages:      {}\n", result.page_count));

    output
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
