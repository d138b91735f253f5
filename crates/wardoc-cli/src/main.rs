//! CLI application for warranty document OCR.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, inference, scan, tools};

/// Warranty document OCR - Extract purchase and warranty details from receipts and cards
#[derive(Parser)]
#[command(name = "wardoc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a single image or PDF
    Scan(scan::ScanArgs),

    /// Scan multiple files
    Batch(batch::BatchArgs),

    /// Infer warranty fields from plain text
    Infer(inference::InferArgs),

    /// Check that the external OCR tools are installed
    Tools,

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr so stdout stays machine-readable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Scan(args) => scan::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Infer(args) => inference::run(args).await,
        Commands::Tools => tools::run(cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args).await,
    }
}
