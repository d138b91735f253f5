//! Tools command - report whether the external binaries can be found.

use console::style;

use wardoc_core::{ToolStatus, probe};

use super::load_config;

pub async fn run(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let tools = [
        probe(&config.pdf.renderer_program, "install poppler-utils"),
        probe(&config.ocr.program, "install tesseract-ocr"),
    ];

    for tool in &tools {
        print_status(tool);
    }

    let missing = tools.iter().filter(|t| !t.is_available()).count();
    if missing > 0 {
        anyhow::bail!("{} required tool(s) missing", missing);
    }

    Ok(())
}

fn print_status(tool: &ToolStatus) {
    match &tool.resolved {
        Some(path) => println!(
            "{} {} ({})",
            style("✓").green(),
            tool.program.display(),
            path.display()
        ),
        None => println!(
            "{} {} not found - {}",
            style("✗").red(),
            tool.program.display(),
            tool.hint
        ),
    }
}
