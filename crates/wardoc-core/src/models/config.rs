//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for the wardoc pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WardocConfig {
    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Temporary artifact configuration.
    pub temp: TempConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Language hint used when a request does not carry one.
    pub language: String,

    /// OCR binary name or path.
    pub program: PathBuf,

    /// Per-image time limit in seconds.
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            program: PathBuf::from("tesseract"),
            timeout_secs: 120,
        }
    }
}

impl OcrConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Embedded text longer than this (after trimming) skips OCR.
    pub min_text_length: usize,

    /// DPI for rendering PDF pages to images.
    pub render_dpi: u32,

    /// Rasterizer binary name or path.
    pub renderer_program: PathBuf,

    /// Whole-document render time limit in seconds.
    pub render_timeout_secs: u64,

    /// Pages recognized at once (1 = strictly sequential).
    pub page_concurrency: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 10,
            render_dpi: 300,
            renderer_program: PathBuf::from("pdftoppm"),
            render_timeout_secs: 120,
            page_concurrency: 1,
        }
    }
}

impl PdfConfig {
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }
}

/// Temporary artifact configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TempConfig {
    /// Directory for artifacts (system temp dir when unset).
    pub root: Option<PathBuf>,

    /// File name prefix for artifacts.
    pub prefix: String,
}

impl Default for TempConfig {
    fn default() -> Self {
        Self {
            root: None,
            prefix: "wardoc-".to_string(),
        }
    }
}

impl WardocConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
