//! Request and result types for document extraction.

use serde::{Deserialize, Serialize};

use crate::error::CleanupWarning;
use crate::ocr::DEFAULT_LANGUAGE;

/// One extraction request: the uploaded bytes and what they claim to be.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// Raw file content.
    pub bytes: Vec<u8>,
    /// Declared MIME type.
    pub mime_type: String,
    /// OCR language hint (e.g. "eng", "eng+deu").
    pub language: String,
}

impl ExtractionRequest {
    /// Create a request with the default "eng" language hint.
    pub fn new(bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Set the language hint; blank values keep the current one.
    pub fn with_language(mut self, language: impl AsRef<str>) -> Self {
        let language = language.as_ref().trim();
        if !language.is_empty() {
            self.language = language.to_string();
        }
        self
    }
}

/// Input families the pipeline accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Any `image/*` type.
    Image,
    /// `application/pdf`.
    Pdf,
}

impl MediaKind {
    /// Classify a declared MIME type. Parameters after `;` are ignored.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        if essence == "application/pdf" {
            Some(Self::Pdf)
        } else if essence.starts_with("image/") && essence.len() > "image/".len() {
            Some(Self::Image)
        } else {
            None
        }
    }
}

/// Page-level text fragments in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedText {
    pages: Vec<String>,
}

impl RecognizedText {
    /// Separator placed between page fragments.
    pub const PAGE_SEPARATOR: &'static str = "\n";

    /// Text from a single fragment.
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            pages: vec![text.into()],
        }
    }

    pub fn from_pages(pages: Vec<String>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All fragments joined with the page separator.
    pub fn text(&self) -> String {
        self.pages.join(Self::PAGE_SEPARATOR)
    }
}

/// Which strategy produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    /// OCR on an uploaded image.
    ImageOcr,
    /// The PDF's embedded text layer.
    EmbeddedText,
    /// OCR on rasterized PDF pages.
    RenderedPages,
}

impl TextSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ImageOcr => "image_ocr",
            Self::EmbeddedText => "embedded_text",
            Self::RenderedPages => "rendered_pages",
        }
    }
}

/// Output of a successful extraction.
#[derive(Debug)]
pub struct Extraction {
    pub text: RecognizedText,
    pub source: TextSource,
    /// Temp artifacts that could not be removed; the result still stands.
    pub cleanup_warnings: Vec<CleanupWarning>,
}

/// Structured fields inferred from recognized text.
///
/// Every field is independently optional; absence means no heuristic matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredFields {
    pub product_name: Option<String>,
    /// ISO `YYYY-MM-DD` when inferred from the date scan, otherwise the
    /// labeled token verbatim.
    pub purchase_date: Option<String>,
    /// The labeled token verbatim.
    pub expiry_date: Option<String>,
    pub warranty_months: Option<u32>,
}

impl StructuredFields {
    /// True when no field was inferred.
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.purchase_date.is_none()
            && self.expiry_date.is_none()
            && self.warranty_months.is_none()
    }
}

/// Loose tokens worth showing next to the structured fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTokens {
    /// Date-like tokens in reading order.
    pub dates: Vec<String>,
    /// Serial or model number-like tokens in reading order.
    pub serials: Vec<String>,
}

/// Result of the boundary `scan` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    /// Raw recognized text.
    pub text: String,
    /// Inferred structured fields.
    pub extracted: StructuredFields,
    /// Candidate dates and serial numbers.
    pub candidates: CandidateTokens,
    /// Strategy that produced the text.
    pub source: TextSource,
    /// Temp cleanup problems encountered along the way.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
