//! Core library for warranty document OCR.
//!
//! This crate provides:
//! - Request-scoped temp artifacts with guaranteed cleanup
//! - PDF embedded-text extraction and page rendering (`pdftoppm`)
//! - Text recognition (`tesseract`)
//! - The extraction pipeline choosing between them
//! - Heuristic inference of purchase date, expiry date, warranty length and product name

pub mod error;
pub mod fields;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod scanner;
pub mod temp;
pub mod tools;

#[cfg(test)]
mod testing;

pub use error::{CleanupWarning, ErrorKind, ExtractError, RecognitionError, RenderError, Result};
pub use fields::infer;
pub use fields::rules::candidate_tokens;
pub use models::config::WardocConfig;
pub use models::document::{
    CandidateTokens, Extraction, ExtractionRequest, MediaKind, RecognizedText, ScanOutcome,
    StructuredFields, TextSource,
};
pub use ocr::{Tesseract, TextRecognizer};
pub use pdf::{PageRenderer, PdfTextLayer, Pdftoppm, TextLayer};
pub use pipeline::ExtractionPipeline;
pub use scanner::DocumentScanner;
pub use temp::{ArtifactScope, TempArtifact, TempKind, TempStore};
pub use tools::{probe, ToolStatus};
