//! Extract command - run field extraction on one document locally.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Utc;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tracing::debug;

use invq_core::{ExtractedDocument, InvoiceRecord, PdfDocumentExtractor};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// PDF to read: an http(s) URL or a local path
    #[arg(required = true)]
    file_ref: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Owner recorded on the previewed invoice
    #[arg(long, default_value = "local")]
    user_id: String,

    /// Show extraction confidence and warnings
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON with the raw fields and the invoice record
    Json,
    /// CSV row of the invoice record
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Extracting {}...", args.file_ref));

    let extractor = PdfDocumentExtractor::new(config.pdf)?;
    let document = match extractor.extract_document(&args.file_ref).await {
        Ok(document) => document,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };
    spinner.finish_and_clear();

    let invoice = InvoiceRecord::from_fields(&args.user_id, &document.result.fields, Utc::now())?;
    let output = format_output(&document, &invoice, args.format)?;

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

    if args.show_confidence {
        eprintln!();
        eprintln!(
            "{} Extraction confidence: {:.1}%",
            style("ℹ").blue(),
            document.result.confidence * 100.0
        );
        eprintln!(
            "{} {} page(s), parsed in {}ms",
            style("ℹ").blue(),
            document.page_count,
            document.result.processing_time_ms
        );
        for warning in &document.result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_output(
    document: &ExtractedDocument,
    invoice: &InvoiceRecord,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "fields": document.result.fields,
            "invoice": invoice,
        }))?),
        OutputFormat::Csv => format_csv(invoice),
        OutputFormat::Text => Ok(format_text(invoice)),
    }
}

fn format_csv(invoice: &InvoiceRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "user_id",
        "vendor_name",
        "invoice_number",
        "invoice_date",
        "due_date",
        "amount",
        "status",
    ])?;

    wtr.write_record([
        invoice.user_id.as_str(),
        invoice.vendor_name.as_str(),
        invoice.invoice_number.as_str(),
        invoice.invoice_date.as_str(),
        invoice.due_date.as_deref().unwrap_or(""),
        invoice.amount.to_string().as_str(),
        invoice.status.as_str(),
    ])?;

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(invoice: &InvoiceRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Vendor:  {}\n", invoice.vendor_name));
    if invoice.invoice_number.is_empty() {
        output.push_str("Invoice: (not found)\n");
    } else {
        output.push_str(&format!("Invoice: {}\n", invoice.invoice_number));
    }
    output.push_str(&format!("Date:    {}\n", invoice.invoice_date));
    if let Some(due_date) = &invoice.due_date {
        output.push_str(&format!("Due:     {}\n", due_date));
    }
    output.push_str(&format!("Amount:  {:.2}\n", invoice.amount));

    output
}
