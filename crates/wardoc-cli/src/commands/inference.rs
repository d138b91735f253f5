//! Infer command - run field inference on text that is already recognized.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use wardoc_core::{CandidateTokens, StructuredFields, candidate_tokens, infer};

/// Arguments for the infer command.
#[derive(Args)]
pub struct InferArgs {
    /// Text file to read, or "-" for stdin
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Include candidate dates and serial numbers
    #[arg(long)]
    candidates: bool,
}

#[derive(Serialize)]
struct InferOutput {
    extracted: StructuredFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidates: Option<CandidateTokens>,
}

pub async fn run(args: InferArgs) -> anyhow::Result<()> {
    let text = if args.input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        fs::read_to_string(&args.input)?
    };

    let output = InferOutput {
        extracted: infer(&text),
        candidates: args.candidates.then(|| candidate_tokens(&text)),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
