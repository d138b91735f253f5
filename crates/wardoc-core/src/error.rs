//! Error types for the wardoc-core library.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::temp::TempKind;

/// Main error type for a single extraction request.
///
/// Only the orchestrator and its two external-tool delegates can fail a
/// request; field inference is infallible.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Declared MIME type is neither an image family nor PDF.
    #[error("unsupported content type: {0}")]
    UnsupportedType(String),

    /// Page rasterization failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// OCR engine failed.
    #[error("recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// The temporary storage area could not be written.
    #[error("temporary storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ExtractError {
    /// Classification reported to the boundary layer.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedType(_) => ErrorKind::UnsupportedType,
            Self::Render(_) => ErrorKind::Render,
            Self::Recognition(_) => ErrorKind::Recognition,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Coarse error classification for transport layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    #[serde(rename = "UnsupportedTypeError")]
    UnsupportedType,
    #[serde(rename = "RenderError")]
    Render,
    #[serde(rename = "RecognitionError")]
    Recognition,
    #[serde(rename = "StorageError")]
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedType => "UnsupportedTypeError",
            Self::Render => "RenderError",
            Self::Recognition => "RecognitionError",
            Self::Storage => "StorageError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors while reading a PDF's embedded text layer.
///
/// These never fail a request; they only route it to the OCR fallback.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors from the page rasterizer.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The rasterizer binary could not be found.
    #[error("rasterizer not found: {0}")]
    ToolMissing(String),

    /// The rasterizer exited with a failure status.
    #[error("rasterizer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    /// The rasterizer did not finish in time.
    #[error("rasterizer timed out after {0:?}")]
    Timeout(Duration),

    /// The rasterizer succeeded but produced no page images.
    #[error("rasterizer produced no pages")]
    NoPages,

    /// I/O error while running the rasterizer or listing its output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the OCR engine.
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// The OCR binary could not be found.
    #[error("OCR engine not found: {0}")]
    ToolMissing(String),

    /// The image to recognize does not exist.
    #[error("image not found: {}", .0.display())]
    MissingImage(PathBuf),

    /// The OCR engine exited with a failure status.
    #[error("OCR engine exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    /// The OCR engine did not finish in time.
    #[error("OCR engine timed out after {0:?}")]
    Timeout(Duration),

    /// I/O error while running the OCR engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A temp artifact that could not be removed.
///
/// Non-fatal: the extraction outcome stands regardless.
#[derive(Error, Debug)]
#[error("failed to remove temporary {kind} {}: {source}", .path.display())]
pub struct CleanupWarning {
    pub path: PathBuf,
    pub kind: TempKind,
    #[source]
    pub source: std::io::Error,
}

/// Result type for the wardoc library.
pub type Result<T> = std::result::Result<T, ExtractError>;
