//! Scan command - extract text and warranty fields from a single file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use wardoc_core::{DocumentScanner, ScanOutcome};

use super::load_config;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input file (PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Declared MIME type (default: detected from content, then extension)
    #[arg(short, long)]
    mime: Option<String>,

    /// OCR language, e.g. "eng" or "eng+deu"
    #[arg(short, long)]
    lang: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
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
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let data = fs::read(&args.input)?;
    let mime_type = args
        .mime
        .clone()
        .unwrap_or_else(|| detect_mime_type(&args.input, &data));

    info!("Scanning {} as {}", args.input.display(), mime_type);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    spinner.set_message("Extracting text...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let scanner = DocumentScanner::from_config(&config);
    let result = scanner.scan(&data, &mime_type, args.lang.as_deref()).await;
    spinner.finish_and_clear();

    let outcome = result.map_err(|e| anyhow::anyhow!("{}: {}", e.kind(), e))?;

    for warning in &outcome.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let output = format_outcome(&outcome, args.format)?;

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

/// MIME type from magic bytes, falling back to the file extension.
pub fn detect_mime_type(path: &Path, data: &[u8]) -> String {
    infer::get(data)
        .map(|kind| kind.mime_type().to_string())
        .unwrap_or_else(|| {
            mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        })
}

pub fn format_outcome(outcome: &ScanOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Csv => format_csv(outcome),
        OutputFormat::Text => Ok(format_text(outcome)),
    }
}

fn format_csv(outcome: &ScanOutcome) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "product_name",
        "purchase_date",
        "expiry_date",
        "warranty_months",
        "candidate_dates",
        "candidate_serials",
    ])?;

    let fields = &outcome.extracted;
    wtr.write_record([
        fields.product_name.clone().unwrap_or_default(),
        fields.purchase_date.clone().unwrap_or_default(),
        fields.expiry_date.clone().unwrap_or_default(),
        fields.warranty_months.map(|m| m.to_string()).unwrap_or_default(),
        outcome.candidates.dates.join(";"),
        outcome.candidates.serials.join(";"),
    ])?;

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(outcome: &ScanOutcome) -> String {
    let fields = &outcome.extracted;
    let or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();

    let mut output = String::new();
    output.push_str(&format!("Product:    {}\n", or_dash(fields.product_name.as_deref())));
    output.push_str(&format!("Purchased:  {}\n", or_dash(fields.purchase_date.as_deref())));
    output.push_str(&format!("Expires:    {}\n", or_dash(fields.expiry_date.as_deref())));
    output.push_str(&format!(
        "Warranty:   {}\n",
        fields
            .warranty_months
            .map(|m| format!("{} months", m))
            .unwrap_or_else(|| "-".to_string())
    ));

    if !outcome.candidates.dates.is_empty() {
        output.push_str(&format!("\nDates:   {}\n", outcome.candidates.dates.join(", ")));
    }
    if !outcome.candidates.serials.is_empty() {
        output.push_str(&format!("Serials: {}\n", outcome.candidates.serials.join(", ")));
    }

    output.push_str("\n--- Text ---\n");
    output.push_str(&outcome.text);
    output.push('\n');

    output
}
