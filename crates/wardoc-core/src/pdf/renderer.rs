//! Page rasterization with poppler's `pdftoppm`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::PageRenderer;
use crate::error::RenderError;
use crate::models::config::PdfConfig;
use crate::tools::{run_with_timeout, ToolFailure};

/// File name prefix for rendered pages (`page-01.png`, `page-02.png`, ...).
pub const PAGE_PREFIX: &str = "page";

/// Renders every page to PNG via `pdftoppm`.
#[derive(Debug, Clone)]
pub struct Pdftoppm {
    program: PathBuf,
    dpi: u32,
    timeout: Duration,
}

impl Pdftoppm {
    /// Create a renderer with default settings (300 DPI, 120 s limit).
    pub fn new() -> Self {
        Self::from_config(&PdfConfig::default())
    }

    pub fn from_config(config: &PdfConfig) -> Self {
        Self {
            program: config.renderer_program.clone(),
            dpi: config.render_dpi,
            timeout: config.render_timeout(),
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for Pdftoppm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageRenderer for Pdftoppm {
    async fn render(&self, pdf_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
        let mut command = Command::new(&self.program);
        command
            .args(["-png", "-r", &self.dpi.to_string()])
            .arg(pdf_path)
            .arg(output_dir.join(PAGE_PREFIX));

        debug!("Rendering {} at {} DPI", pdf_path.display(), self.dpi);

        run_with_timeout(command, self.timeout)
            .await
            .map_err(|failure| match failure {
                ToolFailure::NotFound => RenderError::ToolMissing(format!(
                    "{} not found (install poppler-utils)",
                    self.program.display()
                )),
                ToolFailure::Exit { status, stderr } => RenderError::Failed { status, stderr },
                ToolFailure::Timeout(limit) => RenderError::Timeout(limit),
                ToolFailure::Io(e) => RenderError::Io(e),
            })?;

        let pages = list_page_images(output_dir)?;
        if pages.is_empty() {
            return Err(RenderError::NoPages);
        }

        debug!("Rendered {} pages", pages.len());
        Ok(pages)
    }
}

/// List rendered page images in page order.
///
/// `pdftoppm` zero-pads page numbers to a common width within one run, so
/// sorting by file name is page order.
pub fn list_page_images(output_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut pages: Vec<PathBuf> = fs::read_dir(output_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("png"))
        })
        .collect();

    pages.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pages)
}
