//! Local PDF text extraction using pdf-extract
//!
//! Local extraction has no access to per-page bounding boxes, so the
//! two-column heuristic does not apply here; it belongs to the
//! page-object-based conversion service path (see [`crate::page`]).

use std::path::Path;

use crate::{Result, TextError};

/// Raw text pulled out of a PDF, before normalization.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: Option<u32>,
}

/// PDF text extractor
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract text from a PDF file on disk.
    pub fn extract_file(&self, path: &Path) -> Result<ExtractedText> {
        let bytes = std::fs::read(path).map_err(|e| TextError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        self.extract_bytes(&bytes)
    }

    /// Extract text from in-memory PDF bytes (uploaded documents).
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<ExtractedText> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| TextError::Pdf(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(TextError::EmptyDocument);
        }

        // Rough page estimate from form feed characters
        let page_count = text.matches('\x0C').count() as u32;
        let page_count = if page_count > 0 {
            Some(page_count + 1)
        } else {
            None
        };

        Ok(ExtractedText { text, page_count })
    }
}
