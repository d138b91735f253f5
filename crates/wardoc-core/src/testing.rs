//! Fake external tools that record how they were called.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{RecognitionError, RenderError};
use crate::ocr::TextRecognizer;
use crate::pdf::{list_page_images, PageRenderer, TextLayer};

/// Text layer returning fixed text.
pub struct FakeTextLayer(pub String);

impl TextLayer for FakeTextLayer {
    fn extract_text(&self, _data: &[u8]) -> String {
        self.0.clone()
    }
}

/// Renderer writing `pages` placeholder PNGs, or failing.
pub struct FakeRenderer {
    pub pages: usize,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl FakeRenderer {
    pub fn with_pages(pages: usize) -> Self {
        Self {
            pages,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            pages: 0,
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageRenderer for FakeRenderer {
    async fn render(&self, pdf_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !pdf_path.is_file() {
            return Err(RenderError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "source PDF missing",
            )));
        }
        if self.fail {
            return Err(RenderError::Failed {
                status: "exit status: 1".to_string(),
                stderr: "syntax error".to_string(),
            });
        }

        for page in 1..=self.pages {
            fs::write(output_dir.join(format!("page-{:02}.png", page)), b"png")?;
        }

        let pages = list_page_images(output_dir)?;
        if pages.is_empty() {
            return Err(RenderError::NoPages);
        }
        Ok(pages)
    }
}

/// Recognizer answering "text of <file name>", recording every image path.
#[derive(Default)]
pub struct FakeRecognizer {
    pub fail_on_call: Option<usize>,
    /// Delay the first pages longest, to shuffle completion order.
    pub staggered: bool,
    /// Replace each image with a non-empty directory so it cannot be removed as a file.
    pub clobber_images: bool,
    pub seen: Mutex<Vec<PathBuf>>,
    pub languages: Mutex<Vec<String>>,
}

impl FakeRecognizer {
    pub fn failing_on_call(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }

    pub fn staggered() -> Self {
        Self {
            staggered: true,
            ..Self::default()
        }
    }

    pub fn clobbering() -> Self {
        Self {
            clobber_images: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn seen_names(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    pub fn text_for(path: &Path) -> String {
        format!("text of {}", path.file_name().unwrap().to_string_lossy())
    }
}

#[async_trait]
impl TextRecognizer for FakeRecognizer {
    async fn recognize(&self, image_path: &Path, language: &str) -> Result<String, RecognitionError> {
        if !image_path.is_file() {
            return Err(RecognitionError::MissingImage(image_path.to_path_buf()));
        }

        let call = {
            let mut seen = self.seen.lock().unwrap();
            seen.push(image_path.to_path_buf());
            seen.len()
        };
        self.languages.lock().unwrap().push(language.to_string());

        if self.staggered {
            let delay = 60u64.saturating_sub(call as u64 * 20);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if self.fail_on_call == Some(call) {
            return Err(RecognitionError::Failed {
                status: "exit status: 1".to_string(),
                stderr: "cannot read image".to_string(),
            });
        }

        if self.clobber_images {
            clobber_with_directory(image_path)?;
        }

        Ok(Self::text_for(image_path))
    }
}

/// Swap the file at `path` for a non-empty directory of the same name.
pub fn clobber_with_directory(path: &Path) -> std::io::Result<()> {
    fs::remove_file(path)?;
    fs::create_dir(path)?;
    fs::write(path.join("keep"), b"x")
}

/// Number of entries directly under `dir`.
pub fn entry_count(dir: &Path) -> usize {
    fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
