//! Inspect command - show how the heuristics read a document.

use std::path::PathBuf;

use clap::Args;
use console::style;

use remit_core::remittance::rules::ClaimScanner;
use remit_core::remittance::{PageCountSource, ProcessedDocument};
use remit_core::{ExtractionPipeline, RawDocument};

use super::{ensure_pdf_input, load_config};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Print only lines that a heuristic picked up
    #[arg(long)]
    annotated_only: bool,
}

pub async fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    ensure_pdf_input(&args.input)?;

    let doc = RawDocument::from_path(&args.input, config.batch.default_insurance_name.clone())?;
    let pipeline = ExtractionPipeline::from_config(&config);
    let processed = pipeline.process_detailed(&doc)?;

    print!("{}", render(&processed, args.annotated_only));
    Ok(())
}

/// Tags for every heuristic hit on a line.
fn annotations(processed: &ProcessedDocument, idx: usize) -> Vec<String> {
    let parsed = &processed.parsed;
    let mut tags = Vec::new();

    if parsed.reversed_lines.contains(&idx) {
        tags.push("reversed".to_string());
    }
    if parsed.practice_name.as_ref().is_some_and(|m| m.line_index == idx) {
        tags.push("practice".to_string());
    }
    if parsed.page_count.as_ref().is_some_and(|m| m.line_index == idx) {
        tags.push("pages".to_string());
    }
    if parsed.trace.check_number.as_ref().is_some_and(|m| m.line_index == idx) {
        tags.push("check #".to_string());
    }
    if parsed.trace.check_amount.as_ref().is_some_and(|m| m.line_index == idx) {
        tags.push("amount".to_string());
    }
    if parsed.printed_date.as_ref().is_some_and(|m| m.line_index == idx) {
        tags.push("printed".to_string());
    }
    for (n, block) in parsed.claims.blocks.iter().enumerate() {
        if block.header_index == idx {
            tags.push(format!("block {} header", n + 1));
        }
        if block.totals_index == idx {
            tags.push(format!("block {} totals", n + 1));
        }
    }
    if ClaimScanner::is_service_row(&parsed.normalized_lines[idx]) {
        tags.push("service row".to_string());
    }

    tags
}

fn render(processed: &ProcessedDocument, annotated_only: bool) -> String {
    let parsed = &processed.parsed;
    let mut output = String::new();

    let source = match processed.page_count_source {
        PageCountSource::Text => "page marker",
        PageCountSource::Structure => "page tree",
    };
    output.push_str(&format!(
        "{} {} lines via {}, {} reversed; page count {} from {}\n\n",
        style("ℹ").blue(),
        parsed.normalized_lines.len(),
        processed.extractor,
        parsed.reversed_lines.len(),
        processed.result.page_count,
        source
    ));

    for (idx, line) in parsed.normalized_lines.iter().enumerate() {
        let tags = annotations(processed, idx);
        if annotated_only && tags.is_empty() {
            continue;
        }
        let tag_text = if tags.is_empty() {
            String::new()
        } else {
            format!("  {}", style(format!("[{}]", tags.join(", "))).cyan())
        };
        output.push_str(&format!("{:>4} | {}{}\n", idx, line, tag_text));
    }

    output.push('\n');
    if parsed.claims.used_fallback() {
        output.push_str(&format!(
            "{} No closed claim block; {} service rows counted document-wide\n",
            style("!").yellow(),
            parsed.claims.claim_count()
        ));
    } else {
        for (n, block) in parsed.claims.blocks.iter().enumerate() {
            output.push_str(&format!(
                "Block {}: lines {}..{}, {} service rows\n",
                n + 1,
                block.header_index,
                block.totals_index,
                block.service_rows
            ));
        }
    }

    for warning in &parsed.warnings {
        output.push_str(&format!("{} {}\n", style("!").yellow(), warning));
    }

    output
}
