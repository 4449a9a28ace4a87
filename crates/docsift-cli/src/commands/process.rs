//! Process command - extract a record from a single OCR text dump.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::{debug, info};

use docsift_core::models::config::DocsiftConfig;
use docsift_core::models::record::{DocumentKind, DocumentRecord};
use docsift_core::{IdentityParser, ReceiptParser};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input text file, or '-' for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Document kind to extract
    #[arg(short, long, value_enum, default_value = "receipt")]
    kind: KindArg,

    /// OCR confidence reported by the provider (0-100)
    #[arg(long, default_value_t = 100.0)]
    confidence: f64,

    /// Date standing in for today (used for date fallbacks and
    /// birth/expiration disambiguation)
    #[arg(long, value_name = "YYYY-MM-DD")]
    reference_date: Option<String>,

    /// Print extraction warnings to stderr
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

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    /// Retail receipt
    Receipt,
    /// Identity card
    Identity,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Receipt => DocumentKind::Receipt,
            KindArg::Identity => DocumentKind::IdentityCard,
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        DocsiftConfig::from_file(Path::new(path))?
    } else {
        DocsiftConfig::default()
    };

    let reference_date = parse_reference_date(args.reference_date.as_deref())?;
    let text = read_input(&args.input)?;

    info!("Processing {} characters of OCR text", text.len());

    let (record, warnings, time_ms) = extract_record(
        &text,
        args.kind.into(),
        args.confidence,
        reference_date,
        &config,
    );

    debug!("Extraction finished in {}ms", time_ms);

    if args.show_warnings && !warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &warnings {
            eprintln!("  - {}", warning);
        }
    }

    // Format output
    let output = format_record(&record, args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Parse the optional `--reference-date` flag.
pub(crate) fn parse_reference_date(flag: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
    flag.map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("invalid --reference-date, expected YYYY-MM-DD")
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    Ok(fs::read_to_string(input)?)
}

/// Run the pipeline for `kind` and return the record with its
/// diagnostics.
pub(crate) fn extract_record(
    text: &str,
    kind: DocumentKind,
    confidence: f64,
    reference_date: Option<NaiveDate>,
    config: &DocsiftConfig,
) -> (DocumentRecord, Vec<String>, u64) {
    match kind {
        DocumentKind::Receipt => {
            let mut parser = ReceiptParser::new().with_config(config.extraction.clone());
            if let Some(date) = reference_date {
                parser = parser.with_reference_date(date);
            }
            let extraction = parser.parse(text, confidence);
            (
                DocumentRecord::Receipt(extraction.record),
                extraction.warnings,
                extraction.processing_time_ms,
            )
        }
        DocumentKind::IdentityCard => {
            let mut parser = IdentityParser::new().with_config(config.extraction.clone());
            if let Some(date) = reference_date {
                parser = parser.with_reference_date(date);
            }
            let extraction = parser.parse(text, confidence);
            (
                DocumentRecord::IdentityCard(extraction.record),
                extraction.warnings,
                extraction.processing_time_ms,
            )
        }
    }
}

pub(crate) fn format_record(
    record: &DocumentRecord,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &DocumentRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    match record {
        DocumentRecord::Receipt(receipt) => {
            wtr.write_record(["vendor", "amount", "date", "description", "confidence"])?;
            wtr.write_record([
                &receipt.vendor,
                &receipt.amount.to_string(),
                &receipt.date.to_string(),
                &receipt.description,
                &receipt.confidence.to_string(),
            ])?;
        }
        DocumentRecord::IdentityCard(card) => {
            wtr.write_record([
                "type",
                "name",
                "number",
                "address",
                "date_of_birth",
                "expiration",
                "confidence",
                "verified",
            ])?;
            wtr.write_record([
                &card.kind,
                &card.name,
                &card.number,
                &card.address,
                &card.date_of_birth.map(|d| d.to_string()).unwrap_or_default(),
                &card.expiration.map(|d| d.to_string()).unwrap_or_default(),
                &card.confidence.to_string(),
                &card.verified.to_string(),
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &DocumentRecord) -> String {
    let mut output = String::new();

    match record {
        DocumentRecord::Receipt(receipt) => {
            output.push_str("Receipt\n");
            output.push_str(&format!("  Vendor: {}\n", receipt.vendor));
            output.push_str(&format!("  Amount: {}\n", receipt.amount));
            output.push_str(&format!("  Date: {}\n", receipt.date));
            output.push_str(&format!("  Description: {}\n", receipt.description));
            output.push_str(&format!("  Confidence: {}%\n", receipt.confidence));
        }
        DocumentRecord::IdentityCard(card) => {
            output.push_str(&format!("Identity Card ({})\n", card.kind));
            output.push_str(&format!("  Name: {}\n", card.name));
            output.push_str(&format!("  Number: {}\n", card.number));
            output.push_str(&format!("  Address: {}\n", card.address));
            output.push_str(&format!(
                "  Date of birth: {}\n",
                card.date_of_birth
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "Unknown".to_string())
            ));
            output.push_str(&format!(
                "  Expires: {}\n",
                card.expiration
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "Unknown".to_string())
            ));
            output.push_str(&format!("  Confidence: {}%\n", card.confidence));
            output.push_str(&format!(
                "  Verified: {}\n",
                if card.verified { "yes" } else { "no" }
            ));
        }
    }

    output
}
