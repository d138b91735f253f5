//! Embedded text extraction using lopdf and pdf-extract.

use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::debug;

use super::TextLayer;
use crate::error::PdfError;

/// Embedded text layer reader.
///
/// Documents encrypted with an empty password are decrypted before
/// extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextLayer;

impl PdfTextLayer {
    pub fn new() -> Self {
        Self
    }

    /// Extract text, reporting why extraction was impossible.
    pub fn try_extract_text(&self, data: &[u8]) -> Result<String, PdfError> {
        let prepared = Self::prepare(data)?;

        // pdf-extract panics on some malformed content streams.
        let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&prepared)
        }))
        .map_err(|_| PdfError::TextExtraction("extractor panicked".to_string()))?;

        extracted.map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    /// Load the document, returning bytes pdf-extract can read.
    fn prepare(data: &[u8]) -> Result<Cow<'_, [u8]>, PdfError> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }

        if !doc.is_encrypted() {
            return Ok(Cow::Borrowed(data));
        }

        if doc.decrypt("").is_err() {
            return Err(PdfError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");

        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
        Ok(Cow::Owned(decrypted))
    }
}

impl TextLayer for PdfTextLayer {
    fn extract_text(&self, data: &[u8]) -> String {
        match self.try_extract_text(data) {
            Ok(text) => {
                debug!("Embedded text layer: {} chars", text.trim().len());
                text
            }
            Err(e) => {
                debug!("No usable embedded text: {}", e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    fn text_pdf(line: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut data = Vec::new();
        doc.save_to(&mut data).unwrap();
        data
    }

    #[test]
    fn test_extracts_embedded_text() {
        let data = text_pdf("Warranty card purchased 12/03/2024");
        let layer = PdfTextLayer::new();

        let text = layer.extract_text(&data);
        assert!(text.contains("Warranty"), "unexpected text: {:?}", text);
    }

    #[test]
    fn test_garbage_yields_empty_text() {
        let layer = PdfTextLayer::new();
        assert_eq!(layer.extract_text(b"not a pdf at all"), "");
        assert!(matches!(
            layer.try_extract_text(b"not a pdf at all"),
            Err(PdfError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_input_yields_empty_text() {
        assert_eq!(PdfTextLayer::new().extract_text(&[]), "");
    }
}
