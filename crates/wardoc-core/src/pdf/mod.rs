//! PDF processing: embedded text layer and page rasterization.

mod extractor;
mod renderer;

pub use extractor::PdfTextLayer;
pub use renderer::{list_page_images, Pdftoppm, PAGE_PREFIX};

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::RenderError;

/// Reads text stored directly in a PDF, without rendering.
pub trait TextLayer: Send + Sync {
    /// Extract embedded text from raw PDF bytes.
    ///
    /// Unreadable documents yield an empty string.
    fn extract_text(&self, data: &[u8]) -> String;
}

/// Converts PDF pages into raster images.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Render every page of `pdf_path` into `output_dir`.
    ///
    /// Returns image paths in page order. Producing no images is an error.
    async fn render(&self, pdf_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, RenderError>;
}
