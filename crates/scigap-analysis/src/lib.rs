//! Scigap Analysis - From raw entities to diversity signals
//!
//! Implements the middle and back of the document pipeline:
//! - Classifier/cleaner: raw entity records → author/institution/
//!   technology frequency tables with per-bucket noise filtering
//! - Diversity scorer: Shannon entropy over any frequency table plus
//!   the high/low label
//! - Pipeline: normalization → segmentation + extraction →
//!   classification → result assembly, and validation scoring

pub mod classify;
pub mod diversity;
pub mod pipeline;

pub use classify::{Bucket, ClassifiedEntities, EntityClassifier};
pub use diversity::{keyword_frequencies, shannon_entropy};
pub use pipeline::DocumentAnalyzer;
