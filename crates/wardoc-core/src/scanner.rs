//! Boundary call: raw bytes and a declared MIME type in, text and fields out.

use tracing::debug;

use crate::error::Result;
use crate::fields::{self, rules::candidate_tokens};
use crate::models::config::WardocConfig;
use crate::models::document::{ExtractionRequest, ScanOutcome};
use crate::ocr::{Tesseract, TextRecognizer};
use crate::pdf::{PageRenderer, PdfTextLayer, Pdftoppm, TextLayer};
use crate::pipeline::ExtractionPipeline;

/// Extraction followed by field inference.
pub struct DocumentScanner<R = Pdftoppm, T = Tesseract, L = PdfTextLayer> {
    pipeline: ExtractionPipeline<R, T, L>,
    default_language: String,
}

impl DocumentScanner {
    pub fn from_config(config: &WardocConfig) -> Self {
        Self {
            pipeline: ExtractionPipeline::from_config(config),
            default_language: config.ocr.language.clone(),
        }
    }
}

impl<R, T, L> DocumentScanner<R, T, L>
where
    R: PageRenderer,
    T: TextRecognizer,
    L: TextLayer,
{
    pub fn new(pipeline: ExtractionPipeline<R, T, L>, default_language: impl Into<String>) -> Self {
        Self {
            pipeline,
            default_language: default_language.into(),
        }
    }

    pub fn pipeline(&self) -> &ExtractionPipeline<R, T, L> {
        &self.pipeline
    }

    /// Extract text from `bytes` and infer warranty fields from it.
    ///
    /// `language` falls back to the configured default when absent or blank.
    /// Inference itself never fails, so every error comes from extraction.
    pub async fn scan(&self, bytes: &[u8], mime_type: &str, language: Option<&str>) -> Result<ScanOutcome> {
        let request = ExtractionRequest::new(bytes, mime_type)
            .with_language(&self.default_language)
            .with_language(language.unwrap_or_default());

        let extraction = self.pipeline.extract(&request).await?;
        let text = extraction.text.text();

        let extracted = fields::infer(&text);
        let candidates = candidate_tokens(&text);
        debug!(
            "Inferred fields {:?} with {} date and {} serial candidates",
            extracted,
            candidates.dates.len(),
            candidates.serials.len()
        );

        Ok(ScanOutcome {
            text,
            extracted,
            candidates,
            source: extraction.source,
            warnings: extraction
                .cleanup_warnings
                .iter()
                .map(ToString::to_string)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::document::{StructuredFields, TextSource};
    use crate::temp::TempStore;
    use crate::testing::{entry_count, FakeRecognizer, FakeRenderer, FakeTextLayer};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn scanner(root: &TempDir, embedded: &str) -> DocumentScanner<FakeRenderer, FakeRecognizer, FakeTextLayer> {
        let pipeline = ExtractionPipeline::new(
            FakeRenderer::with_pages(2),
            FakeRecognizer::default(),
            FakeTextLayer(embedded.to_string()),
            TempStore::new(root.path(), "scan-"),
        );
        DocumentScanner::new(pipeline, "pol")
    }

    #[tokio::test]
    async fn test_scan_embedded_pdf() {
        let root = TempDir::new().unwrap();
        let text = "Product Name: Galaxy S23\nPurchased on: 15/01/2024\n12 months warranty\nS/N R5CT-2231XK";
        let scanner = scanner(&root, text);

        let outcome = scanner.scan(b"%PDF-1.7", "application/pdf", None).await.unwrap();

        assert_eq!(outcome.text, text);
        assert_eq!(outcome.source, TextSource::EmbeddedText);
        assert_eq!(
            outcome.extracted,
            StructuredFields {
                product_name: Some("Galaxy S23".to_string()),
                purchase_date: Some("15/01/2024".to_string()),
                expiry_date: None,
                warranty_months: Some(12),
            }
        );
        assert_eq!(outcome.candidates.dates, vec!["15/01/2024"]);
        assert_eq!(outcome.candidates.serials, vec!["R5CT-2231XK"]);
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_scan_uses_default_language() {
        let root = TempDir::new().unwrap();
        let scanner = scanner(&root, "");

        scanner.scan(b"img", "image/png", None).await.unwrap();
        scanner.scan(b"img", "image/png", Some(" ")).await.unwrap();
        scanner.scan(b"img", "image/png", Some("eng+deu")).await.unwrap();

        let languages = scanner.pipeline().recognizer().languages.lock().unwrap().clone();
        assert_eq!(languages, vec!["pol", "pol", "eng+deu"]);
        assert_eq!(entry_count(root.path()), 0);
    }

    #[tokio::test]
    async fn test_scan_ocr_text_without_fields() {
        let root = TempDir::new().unwrap();
        let scanner = scanner(&root, "");

        let outcome = scanner.scan(b"%PDF-1.4", "application/pdf", None).await.unwrap();

        assert_eq!(outcome.source, TextSource::RenderedPages);
        assert_eq!(outcome.text, "text of page-01.png\ntext of page-02.png");
        assert!(outcome.extracted.is_empty());
    }

    #[tokio::test]
    async fn test_scan_rejects_unsupported_type() {
        let root = TempDir::new().unwrap();
        let scanner = scanner(&root, "");

        let err = scanner.scan(b"a,b,c", "text/csv", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert_eq!(err.kind().as_str(), "UnsupportedTypeError");
    }

    #[tokio::test]
    async fn test_scan_surfaces_cleanup_warnings() {
        let root = TempDir::new().unwrap();
        let pipeline = ExtractionPipeline::new(
            FakeRenderer::with_pages(2),
            FakeRecognizer::clobbering(),
            FakeTextLayer(String::new()),
            TempStore::new(root.path(), "scan-"),
        );
        let scanner = DocumentScanner::new(pipeline, "eng");

        let outcome = scanner.scan(b"%PDF-1.4", "application/pdf", None).await.unwrap();

        // The page directory holding the clobbered images is still removed recursively.
        assert!(outcome.warnings.is_empty());
        assert_eq!(entry_count(root.path()), 0);

        let outcome = scanner.scan(b"img", "image/jpeg", None).await.unwrap();
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].starts_with("failed to remove temporary file"));

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["warnings"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_scan_outcome_json_shape() {
        let root = TempDir::new().unwrap();
        let scanner = scanner(&root, "Laptop purchased 02/03/2024 with 1 year warranty");

        let outcome = scanner.scan(b"%PDF", "application/pdf", None).await.unwrap();
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["extracted"]["purchaseDate"], "02/03/2024");
        assert_eq!(json["extracted"]["warrantyMonths"], 12);
        assert!(json["extracted"]["expiryDate"].is_null());
        assert_eq!(json["source"], "embedded_text");
        assert!(json.get("warnings").is_none());
    }
}
