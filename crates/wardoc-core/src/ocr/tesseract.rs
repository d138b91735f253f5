//! Tesseract OCR via its command-line binary.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{TextRecognizer, DEFAULT_LANGUAGE};
use crate::error::RecognitionError;
use crate::models::config::OcrConfig;
use crate::tools::{run_with_timeout, ToolFailure};

/// `--oem 1`: LSTM engine only.
pub const ENGINE_MODE_LSTM_ONLY: &str = "1";

/// `--psm 3`: fully automatic page segmentation, no OSD.
pub const PAGE_SEG_MODE_AUTO: &str = "3";

/// Tesseract command-line recognizer.
#[derive(Debug, Clone)]
pub struct Tesseract {
    program: PathBuf,
    timeout: Duration,
}

impl Tesseract {
    /// Create a recognizer with default settings.
    pub fn new() -> Self {
        Self::from_config(&OcrConfig::default())
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            program: config.program.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments for one run, writing text to stdout.
    fn arguments(image_path: &Path, language: &str) -> Vec<OsString> {
        let language = match language.trim() {
            "" => DEFAULT_LANGUAGE,
            lang => lang,
        };

        vec![
            image_path.as_os_str().to_os_string(),
            "stdout".into(),
            "-l".into(),
            language.into(),
            "--oem".into(),
            ENGINE_MODE_LSTM_ONLY.into(),
            "--psm".into(),
            PAGE_SEG_MODE_AUTO.into(),
        ]
    }
}

impl Default for Tesseract {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextRecognizer for Tesseract {
    async fn recognize(&self, image_path: &Path, language: &str) -> Result<String, RecognitionError> {
        if !image_path.exists() {
            return Err(RecognitionError::MissingImage(image_path.to_path_buf()));
        }

        let mut command = Command::new(&self.program);
        command.args(Self::arguments(image_path, language));

        let stdout = run_with_timeout(command, self.timeout)
            .await
            .map_err(|failure| match failure {
                ToolFailure::NotFound => RecognitionError::ToolMissing(format!(
                    "{} not found (install tesseract-ocr)",
                    self.program.display()
                )),
                ToolFailure::Exit { status, stderr } => RecognitionError::Failed { status, stderr },
                ToolFailure::Timeout(limit) => RecognitionError::Timeout(limit),
                ToolFailure::Io(e) => RecognitionError::Io(e),
            })?;

        let text = String::from_utf8_lossy(&stdout).into_owned();
        debug!("Recognized {} chars from {}", text.len(), image_path.display());
        Ok(text)
    }
}
