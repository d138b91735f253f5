//! Extraction orchestrator: picks a strategy per input type and sequences the
//! text layer, page renderer, and text recognizer.
//!
//! All on-disk intermediates live in one [`ArtifactScope`] per request, which
//! is torn down before `extract` returns, on success and failure alike.

use std::path::PathBuf;
use std::time::Instant;

use futures::{stream, StreamExt, TryStreamExt};
use image::ImageFormat;
use tracing::{debug, info};

use crate::error::{ExtractError, RecognitionError, Result};
use crate::models::config::WardocConfig;
use crate::models::document::{Extraction, ExtractionRequest, MediaKind, RecognizedText, TextSource};
use crate::ocr::{Tesseract, TextRecognizer};
use crate::pdf::{PageRenderer, PdfTextLayer, Pdftoppm, TextLayer};
use crate::temp::{ArtifactScope, TempKind, TempStore};

/// Default threshold for trusting a PDF's embedded text.
pub const DEFAULT_MIN_TEXT_LENGTH: usize = 10;

/// Turns uploaded bytes into recognized text.
pub struct ExtractionPipeline<R = Pdftoppm, T = Tesseract, L = PdfTextLayer> {
    renderer: R,
    recognizer: T,
    text_layer: L,
    temp: TempStore,
    min_text_length: usize,
    page_concurrency: usize,
}

impl ExtractionPipeline {
    /// Pipeline backed by `pdftoppm`, `tesseract`, and the lopdf text layer.
    pub fn from_config(config: &WardocConfig) -> Self {
        ExtractionPipeline::new(
            Pdftoppm::from_config(&config.pdf),
            Tesseract::from_config(&config.ocr),
            PdfTextLayer::new(),
            TempStore::from_config(&config.temp),
        )
        .with_min_text_length(config.pdf.min_text_length)
        .with_page_concurrency(config.pdf.page_concurrency)
    }
}

impl<R, T, L> ExtractionPipeline<R, T, L>
where
    R: PageRenderer,
    T: TextRecognizer,
    L: TextLayer,
{
    pub fn new(renderer: R, recognizer: T, text_layer: L, temp: TempStore) -> Self {
        Self {
            renderer,
            recognizer,
            text_layer,
            temp,
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
            page_concurrency: 1,
        }
    }

    /// Embedded text must be longer than this (after trimming) to skip OCR.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    /// Recognize up to `pages` rendered pages at once.
    pub fn with_page_concurrency(mut self, pages: usize) -> Self {
        self.page_concurrency = pages.max(1);
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn recognizer(&self) -> &T {
        &self.recognizer
    }

    pub fn temp_store(&self) -> &TempStore {
        &self.temp
    }

    /// Extract text from one request.
    ///
    /// Unsupported types fail before any temp artifact exists. Render and
    /// recognition failures are fatal, with no partial text.
    pub async fn extract(&self, request: &ExtractionRequest) -> Result<Extraction> {
        let media = MediaKind::from_mime(&request.mime_type)
            .ok_or_else(|| ExtractError::UnsupportedType(request.mime_type.clone()))?;

        let start = Instant::now();
        let mut scope = self.temp.scope();

        let outcome = match media {
            MediaKind::Image => self.extract_image(request, &mut scope).await,
            MediaKind::Pdf => self.extract_pdf(request, &mut scope).await,
        };

        let cleanup_warnings = scope.release_all();
        let (text, source) = outcome?;

        info!(
            "Extracted {} chars from {} ({:?}, {} pages) in {}ms",
            text.text().len(),
            request.mime_type,
            source,
            text.page_count(),
            start.elapsed().as_millis()
        );

        Ok(Extraction {
            text,
            source,
            cleanup_warnings,
        })
    }

    async fn extract_image(
        &self,
        request: &ExtractionRequest,
        scope: &mut ArtifactScope<'_>,
    ) -> Result<(RecognizedText, TextSource)> {
        let suffix = image_suffix(&request.bytes, &request.mime_type);
        let image_path = scope.acquire(TempKind::File, &suffix)?;
        tokio::fs::write(&image_path, &request.bytes).await?;

        let text = self
            .recognizer
            .recognize(&image_path, &request.language)
            .await?;

        Ok((RecognizedText::single(text), TextSource::ImageOcr))
    }

    async fn extract_pdf(
        &self,
        request: &ExtractionRequest,
        scope: &mut ArtifactScope<'_>,
    ) -> Result<(RecognizedText, TextSource)> {
        let embedded = self.text_layer.extract_text(&request.bytes);
        let embedded_len = embedded.trim().chars().count();

        if embedded_len > self.min_text_length {
            debug!("Using embedded text layer ({} chars)", embedded_len);
            return Ok((RecognizedText::single(embedded), TextSource::EmbeddedText));
        }

        debug!(
            "Embedded text too short ({} <= {} chars), rendering pages",
            embedded_len, self.min_text_length
        );

        let pdf_path = scope.acquire(TempKind::File, ".pdf")?;
        tokio::fs::write(&pdf_path, &request.bytes).await?;

        let pages_dir = scope.acquire(TempKind::Directory, "")?;
        let pages = self.renderer.render(&pdf_path, &pages_dir).await?;

        let texts = self.recognize_pages(&pages, &request.language).await?;
        Ok((RecognizedText::from_pages(texts), TextSource::RenderedPages))
    }

    /// Recognize pages, returning texts in page order whatever the concurrency.
    async fn recognize_pages(
        &self,
        pages: &[PathBuf],
        language: &str,
    ) -> std::result::Result<Vec<String>, RecognitionError> {
        debug!(
            "Recognizing {} pages ({} at a time)",
            pages.len(),
            self.page_concurrency
        );

        stream::iter(pages)
            .map(|page| self.recognizer.recognize(page, language))
            .buffered(self.page_concurrency)
            .try_collect()
            .await
    }
}

/// File suffix for an image copy: sniffed from content, else from the MIME type.
fn image_suffix(bytes: &[u8], mime_type: &str) -> String {
    image::guess_format(bytes)
        .ok()
        .or_else(|| ImageFormat::from_mime_type(mime_type))
        .and_then(|format| format.extensions_str().first())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}
