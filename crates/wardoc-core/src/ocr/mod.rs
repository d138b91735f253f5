//! Optical character recognition on single raster images.

mod tesseract;

pub use tesseract::{Tesseract, ENGINE_MODE_LSTM_ONLY, PAGE_SEG_MODE_AUTO};

use std::path::Path;

use async_trait::async_trait;

use crate::error::RecognitionError;

/// Language hint used when none is given.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Turns one image into raw text.
///
/// Implementations are stateless between calls, so pages may be recognized
/// concurrently.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize `image_path` using the given language hint.
    ///
    /// Whitespace and line breaks are returned as the engine emits them.
    async fn recognize(&self, image_path: &Path, language: &str) -> Result<String, RecognitionError>;
}
