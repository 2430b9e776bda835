//! Text Extractor: turns one PDF into its concatenated page text, or a per-file failure.
//!
//! `TextExtractor` is the seam: production uses `PdfTextExtractor`, tests inject
//! a stub so pipeline behaviour can be checked without PDF fixtures.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use thiserror::Error;

/// Extracted text must exceed this many characters (after trimming) to be usable.
/// Scanned, image-only PDFs usually fall at or below it.
pub const MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse PDF: {0}")]
    Parse(String),

    #[error("PDF parser panicked: {0}")]
    Panicked(String),

    #[error("extracted text too short ({chars} chars)")]
    TooShort { chars: usize },
}

/// Produces raw text for a candidate file. Implementations must not panic;
/// every failure is reported as an `ExtractionError`.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// `pdf-extract` backed extractor. Reads the whole file, then parses from memory.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        // The handle is closed as soon as `read` returns.
        let bytes = std::fs::read(path)?;

        let parsed = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&bytes)
        }))
        .map_err(|payload| ExtractionError::Panicked(panic_message(payload.as_ref())))?;

        let text = parsed.map_err(|e| ExtractionError::Parse(e.to_string()))?;
        accept_text(text)
    }
}

/// Applies the minimum-length rule. Returns the text untouched when it passes.
pub fn accept_text(text: String) -> Result<String, ExtractionError> {
    let chars = text.trim().chars().count();
    if chars > MIN_TEXT_CHARS {
        Ok(text)
    } else {
        Err(ExtractionError::TooShort { chars })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
