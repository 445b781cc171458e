//! Document analysis pipeline
//!
//! Ties the stages together: normalization, then segmentation and
//! entity extraction over the same normalized text, then classification
//! into frequency tables. Scoring runs separately over a validation
//! request. Everything is created fresh per invocation; the only shared
//! piece is the injected extractor, which is never mutated.

use std::collections::BTreeMap;
use std::sync::Arc;

use scigap_core::{
    AnalysisConfig, Diversity, DiversityEvaluation, DocumentAnalysis, EntropyReport,
    FrequencyTable, Result, ScigapError, ValidationRequest,
};
use scigap_extractor::EntityExtractor;
use scigap_text::{normalize, SectionSegmenter};

use crate::classify::EntityClassifier;
use crate::diversity::{keyword_frequencies, shannon_entropy};

/// End-to-end analyzer for one document or one validation request.
///
/// The extractor is the only expensive collaborator; it is invoked at
/// most once per input text, and both classification and any free-text
/// keyword table derive from that single pass.
pub struct DocumentAnalyzer {
    extractor: Arc<dyn EntityExtractor>,
    segmenter: SectionSegmenter,
    classifier: EntityClassifier,
    config: AnalysisConfig,
}

impl DocumentAnalyzer {
    pub fn new(extractor: Arc<dyn EntityExtractor>, config: AnalysisConfig) -> Self {
        let classifier = EntityClassifier::new(config.min_entity_count);
        Self {
            extractor,
            segmenter: SectionSegmenter::new(),
            classifier,
            config,
        }
    }

    /// Analyze raw extracted document text into sections and cleaned
    /// entity tables.
    pub fn analyze_text(&self, raw: &str) -> Result<DocumentAnalysis> {
        let normalized = normalize(raw);

        let sections = self.segmenter.segment(&normalized);
        let records = self
            .extractor
            .extract(&normalized)
            .map_err(|e| ScigapError::Processing(format!("entity extraction: {e}")))?;

        let classified = self.classifier.classify(&records);

        tracing::info!(
            sections = sections.len(),
            authors = classified.authors.len(),
            institutions = classified.institutions.len(),
            technologies = classified.technologies.len(),
            "document analyzed"
        );

        Ok(DocumentAnalysis {
            authors: classified.authors,
            institutions: classified.institutions,
            technologies: classified.technologies,
            emergent_technologies: classified.emergent_technologies,
            sections,
        })
    }

    /// Score a validation request: entropy per metadata table, per
    /// section, and for the research-gap text, each labeled against the
    /// diversity threshold.
    ///
    /// Rejects before computing anything when the sections map is
    /// missing/empty or no metadata table is present.
    pub fn score(&self, request: &ValidationRequest) -> Result<EntropyReport> {
        if !request.has_sections() {
            return Err(ScigapError::InvalidInput(
                "Sections data is missing or empty".to_string(),
            ));
        }
        if !request.has_metadata() {
            return Err(ScigapError::InvalidInput(
                "Metadata (authors, institutions, technologies) is missing or empty".to_string(),
            ));
        }

        let threshold = self.config.diversity_threshold;
        let empty = FrequencyTable::new();
        let authors = request.authors.as_ref().unwrap_or(&empty);
        let institutions = request.institutions.as_ref().unwrap_or(&empty);
        let technologies = request.technologies.as_ref().unwrap_or(&empty);

        let authors_entropy = shannon_entropy(authors);
        let institutions_entropy = shannon_entropy(institutions);
        let technologies_entropy = shannon_entropy(technologies);

        let mut entropy_values = BTreeMap::new();
        entropy_values.insert("authors_entropy".to_string(), authors_entropy);
        entropy_values.insert("institutions_entropy".to_string(), institutions_entropy);
        entropy_values.insert("technologies_entropy".to_string(), technologies_entropy);

        let mut section_labels = BTreeMap::new();
        if let Some(sections) = &request.sections {
            for (name, text) in sections {
                let keywords = keyword_frequencies(self.extractor.as_ref(), text)?;
                let entropy = shannon_entropy(&keywords);
                tracing::debug!(section = %name, entropy, "section scored");
                entropy_values.insert(name.clone(), entropy);
                section_labels.insert(name.clone(), Diversity::from_entropy(entropy, threshold));
            }
        }

        let research_gap_entropy = match request.research_gaps.as_deref() {
            Some(text) if !text.trim().is_empty() => {
                let keywords = keyword_frequencies(self.extractor.as_ref(), text)?;
                shannon_entropy(&keywords)
            }
            _ => 0.0,
        };
        entropy_values.insert("research_gap_entropy".to_string(), research_gap_entropy);

        Ok(EntropyReport {
            entropy_values,
            diversity_evaluation: DiversityEvaluation {
                authors: Diversity::from_entropy(authors_entropy, threshold),
                institutions: Diversity::from_entropy(institutions_entropy, threshold),
                technologies: Diversity::from_entropy(technologies_entropy, threshold),
                sections: section_labels,
                research_gaps: Diversity::from_entropy(research_gap_entropy, threshold),
            },
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use scigap_core::{EntityCategory, EntityRecord};

    /// Test extractor: every capitalized word is a person, every
    /// lowercase word of 4+ letters is a technology keyword.
    struct WordExtractor;

    impl EntityExtractor for WordExtractor {
        fn extract(&self, text: &str) -> Result<Vec<EntityRecord>> {
            Ok(text
                .split_whitespace()
                .filter_map(|word| {
                    let word = word.trim_matches(|c: char| !c.is_alphanumeric());
                    if word.is_empty() {
                        None
                    } else if word.chars().next().is_some_and(|c| c.is_uppercase()) {
                        Some(EntityRecord::new(word, EntityCategory::Person))
                    } else if word.len() >= 4 {
                        Some(EntityRecord::new(word, EntityCategory::Technology))
                    } else {
                        None
                    }
                })
                .collect())
        }
    }

    /// Test extractor that must never run.
    struct PanickingExtractor;

    impl EntityExtractor for PanickingExtractor {
        fn extract(&self, _text: &str) -> Result<Vec<EntityRecord>> {
            panic!("extractor invoked before input validation");
        }
    }

    fn analyzer(extractor: impl EntityExtractor + 'static) -> DocumentAnalyzer {
        DocumentAnalyzer::new(Arc::new(extractor), AnalysisConfig::default())
    }

    fn sections(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_analyze_text_builds_sections_and_tables() {
        let analyzer = analyzer(WordExtractor);
        let analysis = analyzer
            .analyze_text("intro Alice wrote this. Discussion blockchain blockchain findings Alice")
            .unwrap();

        assert!(analysis.sections.contains_key("discussion"));
        assert_eq!(analysis.authors.get("alice"), Some(&2));
        assert_eq!(analysis.technologies.get("blockchain"), Some(&2));
    }

    #[test]
    fn test_ten_uniform_keywords_score_high() {
        let analyzer = analyzer(WordExtractor);
        let body = "alpha bravo charlie delta echoes foxtrot golfs hotels indias juliet";
        let request = ValidationRequest {
            sections: Some(sections(&[("discussion", body)])),
            technologies: Some(FrequencyTable::from([("alpha".to_string(), 1)])),
            ..Default::default()
        };

        let report = analyzer.score(&request).unwrap();
        let entropy = report.entropy_values["discussion"];
        assert!((entropy - 10f64.log2()).abs() < 1e-9);
        assert_eq!(
            report.diversity_evaluation.sections["discussion"],
            Diversity::High
        );
    }

    #[test]
    fn test_empty_sections_rejected_before_extraction() {
        let analyzer = analyzer(PanickingExtractor);
        let request = ValidationRequest {
            sections: Some(BTreeMap::new()),
            authors: Some(FrequencyTable::from([("jane doe".to_string(), 2)])),
            ..Default::default()
        };

        let err = analyzer.score(&request).unwrap_err();
        assert!(matches!(err, ScigapError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_metadata_rejected() {
        let analyzer = analyzer(PanickingExtractor);
        let request = ValidationRequest {
            sections: Some(sections(&[("discussion", "body")])),
            ..Default::default()
        };

        let err = analyzer.score(&request).unwrap_err();
        assert!(matches!(err, ScigapError::InvalidInput(_)));
    }

    #[test]
    fn test_score_shapes_and_gap_default() {
        let analyzer = analyzer(WordExtractor);
        let request = ValidationRequest {
            sections: Some(sections(&[("conclusion", "short text here today")])),
            authors: Some(FrequencyTable::from([
                ("jane doe".to_string(), 2),
                ("maria silva".to_string(), 2),
            ])),
            ..Default::default()
        };

        let report = analyzer.score(&request).unwrap();

        assert_eq!(report.entropy_values["authors_entropy"], 1.0);
        assert_eq!(report.entropy_values["institutions_entropy"], 0.0);
        assert_eq!(report.entropy_values["research_gap_entropy"], 0.0);
        assert!(report.entropy_values.contains_key("conclusion"));
        assert_eq!(report.diversity_evaluation.authors, Diversity::Low);
        assert_eq!(report.diversity_evaluation.research_gaps, Diversity::Low);
    }

    #[test]
    fn test_research_gap_text_is_scored() {
        let analyzer = analyzer(WordExtractor);
        let request = ValidationRequest {
            research_gaps: Some(
                "future studies should explore federated approaches beyond current datasets"
                    .to_string(),
            ),
            sections: Some(sections(&[("discussion", "body words here")])),
            technologies: Some(FrequencyTable::from([("blockchain".to_string(), 3)])),
            ..Default::default()
        };

        let report = analyzer.score(&request).unwrap();
        assert!(report.entropy_values["research_gap_entropy"] > 0.0);
    }
}
