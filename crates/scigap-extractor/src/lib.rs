//! Scigap Extractor - Named-entity extraction
//!
//! Defines the pluggable NER capability the pipeline depends on and a
//! default rule-based provider. The extractor is constructed once at
//! process startup and shared by reference into every pipeline
//! invocation; implementations must not keep per-call state.

use scigap_core::{EntityRecord, Result};

/// Trait for entity extractors.
///
/// Output carries no ordering guarantee, and duplicate records are
/// expected: the classifier aggregates them into frequency tables.
pub trait EntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<Vec<EntityRecord>>;
}

pub mod ner;

pub use ner::RuleBasedNer;
