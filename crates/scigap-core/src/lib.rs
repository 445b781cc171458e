//! Scigap Core - Domain models, errors, and shared types
//!
//! This crate defines the core abstractions used throughout the scigap
//! system:
//! - Section and entity vocabularies
//! - Frequency tables and analysis results
//! - Diversity labels and entropy report shapes
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{
    AnalysisConfig, AppConfig, ConfigError, ConversionConfig, LlmConfig, LlmProvider,
    LoggingConfig, ServerConfig,
};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for scigap operations
#[derive(Error, Debug)]
pub enum ScigapError {
    /// The caller supplied input the pipeline cannot analyze
    /// (missing sections, missing metadata tables, empty upload).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Upstream text extraction or remote conversion failed.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Unexpected failure inside normalization, segmentation,
    /// classification, or scoring.
    #[error("Processing failed: {0}")]
    Processing(String),

    /// Language model call failed.
    #[error("Language model error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ScigapError>;

// ============================================================================
// Section Vocabulary
// ============================================================================

/// Canonical section names recognized by the segmenter.
///
/// Synonym headings ("Results and Discussions", "Limitations of the Study")
/// collapse to one of these before a section is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Discussion,
    Conclusion,
    Limitation,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [Self::Discussion, Self::Conclusion, Self::Limitation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discussion => "discussion",
            Self::Conclusion => "conclusion",
            Self::Limitation => "limitation",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Section-name → section-body mapping.
///
/// Invariant: keys are canonical names produced by [`SectionKind::as_str`],
/// and bodies exclude any trailing references block.
pub type SectionMap = BTreeMap<String, String>;

// ============================================================================
// Entities
// ============================================================================

/// Label vocabulary produced by an entity extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Person,
    Organization,
    Technology,
    Product,
    WorkOfArt,
    Date,
    Number,
    Unknown,
}

impl EntityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Organization => "organization",
            Self::Technology => "technology",
            Self::Product => "product",
            Self::WorkOfArt => "work_of_art",
            Self::Date => "date",
            Self::Number => "number",
            Self::Unknown => "unknown",
        }
    }

    /// Categories that feed the technologies bucket.
    pub fn is_technology_like(&self) -> bool {
        matches!(self, Self::Technology | Self::Product | Self::WorkOfArt)
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recognized entity span: surface text plus its category.
///
/// Duplicates are expected and intentional; they carry the frequency
/// signal that the classifier aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub text: String,
    pub category: EntityCategory,
}

impl EntityRecord {
    pub fn new(text: impl Into<String>, category: EntityCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// Normalized entity string → occurrence count.
///
/// Invariant: every key passed the bucket-specific noise filter and
/// counts reflect post-filter occurrences.
pub type FrequencyTable = BTreeMap<String, u64>;

// ============================================================================
// Analysis Results
// ============================================================================

/// Aggregate result of processing one document.
///
/// Created once per request, immutable after construction, serialized
/// verbatim into the JSON response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub authors: FrequencyTable,
    pub institutions: FrequencyTable,
    pub technologies: FrequencyTable,
    /// Technologies mentioned exactly once, treated as a novelty signal.
    pub emergent_technologies: Vec<String>,
    pub sections: SectionMap,
}

/// Categorical diversity label derived from an entropy value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diversity {
    High,
    Low,
}

impl Diversity {
    /// `High` only when the entropy strictly exceeds the threshold;
    /// the boundary value itself is `Low`.
    pub fn from_entropy(entropy: f64, threshold: f64) -> Self {
        if entropy > threshold {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for Diversity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Per-input diversity labels for a validation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiversityEvaluation {
    pub authors: Diversity,
    pub institutions: Diversity,
    pub technologies: Diversity,
    pub sections: BTreeMap<String, Diversity>,
    pub research_gaps: Diversity,
}

/// Entropy values and diversity labels for one validation request.
///
/// `entropy_values` keys are `authors_entropy`, `institutions_entropy`,
/// `technologies_entropy`, one key per supplied section name, and
/// `research_gap_entropy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntropyReport {
    pub entropy_values: BTreeMap<String, f64>,
    pub diversity_evaluation: DiversityEvaluation,
}

/// Input to validation/scoring.
///
/// At least the sections map and at least one metadata table must be
/// present or scoring rejects the request before computing anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_gaps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<FrequencyTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institutions: Option<FrequencyTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<FrequencyTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<BTreeMap<String, String>>,
}

impl ValidationRequest {
    /// True when any of the three metadata tables was supplied.
    pub fn has_metadata(&self) -> bool {
        self.authors.is_some() || self.institutions.is_some() || self.technologies.is_some()
    }

    /// True when a non-empty sections map was supplied.
    pub fn has_sections(&self) -> bool {
        self.sections.as_ref().is_some_and(|s| !s.is_empty())
    }
}

// ============================================================================
// Tests
// ============================================================================
