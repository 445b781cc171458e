//! Scigap Text - Raw text handling for scientific articles
//!
//! Takes raw extracted page text and produces the normalized text and
//! section map the rest of the pipeline operates on:
//! - Layout cleanup (hyphenation breaks, whitespace, unicode punctuation)
//! - Two-column page assembly
//! - Heading-driven section segmentation with synonym normalization
//! - Local PDF text extraction via pdf-extract
//!
//! Structural parsing of unstructured document text is best-effort by
//! nature: headings can be missed and false positives happen. Callers
//! must treat an empty section map as "no analyzable sections", not as
//! a failure.

use thiserror::Error;

pub mod normalize;
pub mod page;
pub mod pdf;
pub mod sections;

pub use normalize::{collapse_whitespace, normalize, replace_unicode, strip_reference_noise};
pub use page::{assemble_document, assemble_page, PageRegions};
pub use pdf::{ExtractedText, PdfExtractor};
pub use sections::SectionSegmenter;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while obtaining raw text
#[derive(Error, Debug)]
pub enum TextError {
    /// IO error while reading the file
    #[error("IO error reading file: {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// PDF extraction error
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// The document produced no text at all
    #[error("Document contains no extractable text")]
    EmptyDocument,
}

pub type Result<T> = std::result::Result<T, TextError>;
