//! Rule-based NER for scholarly text
//!
//! Regex patterns recognize person names, institutions, and dates;
//! a dictionary of research-technology terms (with aliases) covers the
//! technology-like categories. Overlapping matches are deduplicated
//! keeping the highest-confidence span.
//!
//! This is the default provider behind the [`EntityExtractor`] seam;
//! an ML-backed extractor can replace it without touching the pipeline.

use std::collections::HashSet;

use regex::Regex;

use crate::EntityExtractor;
use scigap_core::{EntityCategory, EntityRecord, Result};

/// One recognized span with its position and confidence, before
/// deduplication.
#[derive(Debug, Clone)]
pub struct EntityMatch {
    pub text: String,
    pub category: EntityCategory,
    pub start: usize,
    pub end: usize,
    pub confidence: f32,
}

/// Dictionary entry for technology-term matching
#[derive(Debug)]
struct DictionaryEntry {
    category: EntityCategory,
    confidence: f32,
    /// Word-bounded, case-insensitive matchers for the term and its aliases
    matchers: Vec<Regex>,
}

/// Rule-based NER using regex patterns and a term dictionary
pub struct RuleBasedNer {
    /// Pattern rules (regex -> category, confidence)
    patterns: Vec<(Regex, EntityCategory, f32)>,
    /// Known technology terms
    dictionary: Vec<DictionaryEntry>,
}

impl RuleBasedNer {
    /// Create a new rule-based NER with the scholarly-domain rules
    pub fn new() -> Self {
        let mut ner = Self {
            patterns: Vec::new(),
            dictionary: Vec::new(),
        };

        ner.init_patterns();
        ner.init_technology_dictionary();
        ner
    }

    /// Initialize regex patterns for scholarly text
    fn init_patterns(&mut self) {
        // Person names
        self.add_pattern(
            r"\b[A-Z][a-z]+\s+et\s+al\.?",
            EntityCategory::Person,
            0.85,
        );
        self.add_pattern(
            r"\b[A-Z][a-z]+(?:\s+[A-Z]\.)?\s+[A-Z][a-z]+\b",
            EntityCategory::Person,
            0.7,
        );
        self.add_pattern(r"\b[A-Z]\.\s*[A-Z][a-z]+\b", EntityCategory::Person, 0.75);

        // Institutions
        self.add_pattern(
            r"\bUniversity\s+of\s+[A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)*",
            EntityCategory::Organization,
            0.9,
        );
        self.add_pattern(
            r"\b(?:[A-Z][A-Za-z]+\s+){1,4}(?:University|Institute|Laboratory|College|Centre|Center|Academy|Foundation)\b",
            EntityCategory::Organization,
            0.85,
        );

        // Quoted titled phrases (named works)
        self.add_pattern(r#""[A-Z][^"]{2,60}""#, EntityCategory::WorkOfArt, 0.7);

        // All-caps acronyms read as technologies in this domain
        self.add_pattern(r"\b[A-Z]{2,6}\d{0,2}\b", EntityCategory::Technology, 0.6);

        // Dates - emitted so the classifier can discard them
        self.add_pattern(
            r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b",
            EntityCategory::Date,
            0.95,
        );
        self.add_pattern(
            r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{4}\b",
            EntityCategory::Date,
            0.9,
        );
        self.add_pattern(r"\b(?:19|20)\d{2}\b", EntityCategory::Date, 0.9);

        // Bare numbers, low confidence so any real entity wins the overlap
        self.add_pattern(r"\b\d+(?:\.\d+)?\b", EntityCategory::Number, 0.3);
    }

    /// Initialize the research-technology dictionary
    fn init_technology_dictionary(&mut self) {
        self.add_term("machine learning", EntityCategory::Technology, vec!["ML"]);
        self.add_term("deep learning", EntityCategory::Technology, vec![]);
        self.add_term(
            "neural network",
            EntityCategory::Technology,
            vec!["neural networks", "artificial neural network"],
        );
        self.add_term(
            "artificial intelligence",
            EntityCategory::Technology,
            vec!["AI"],
        );
        self.add_term(
            "natural language processing",
            EntityCategory::Technology,
            vec!["NLP"],
        );
        self.add_term(
            "convolutional neural network",
            EntityCategory::Technology,
            vec!["CNN", "CNNs"],
        );
        self.add_term(
            "support vector machine",
            EntityCategory::Technology,
            vec!["SVM"],
        );
        self.add_term("random forest", EntityCategory::Technology, vec![]);
        self.add_term("reinforcement learning", EntityCategory::Technology, vec![]);
        self.add_term("transfer learning", EntityCategory::Technology, vec![]);
        self.add_term("computer vision", EntityCategory::Technology, vec![]);
        self.add_term("blockchain", EntityCategory::Technology, vec![]);
        self.add_term(
            "internet of things",
            EntityCategory::Technology,
            vec!["IoT"],
        );
        self.add_term("big data", EntityCategory::Technology, vec![]);
        self.add_term("cloud computing", EntityCategory::Technology, vec![]);
        self.add_term("edge computing", EntityCategory::Technology, vec![]);
        self.add_term("digital twin", EntityCategory::Technology, vec![]);
        self.add_term(
            "augmented reality",
            EntityCategory::Technology,
            vec!["AR"],
        );
        self.add_term("virtual reality", EntityCategory::Technology, vec!["VR"]);
        self.add_term("transformer", EntityCategory::Product, vec!["transformers"]);
    }

    /// Add a regex pattern
    fn add_pattern(&mut self, pattern: &str, category: EntityCategory, confidence: f32) {
        if let Ok(regex) = Regex::new(pattern) {
            self.patterns.push((regex, category, confidence));
        }
    }

    /// Add a dictionary term with aliases. Matching is word-bounded and
    /// case-insensitive so "AI" never fires inside "maintain".
    fn add_term(&mut self, term: &str, category: EntityCategory, aliases: Vec<&str>) {
        let matchers = std::iter::once(term)
            .chain(aliases)
            .filter_map(|t| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(t))).ok())
            .collect();

        self.dictionary.push(DictionaryEntry {
            category,
            confidence: 0.95,
            matchers,
        });
    }

    /// Extract entities using pattern matching
    fn extract_by_patterns(&self, text: &str) -> Vec<EntityMatch> {
        let mut entities = Vec::new();

        for (regex, category, confidence) in &self.patterns {
            for mat in regex.find_iter(text) {
                entities.push(EntityMatch {
                    text: mat.as_str().to_string(),
                    category: *category,
                    start: mat.start(),
                    end: mat.end(),
                    confidence: *confidence,
                });
            }
        }

        entities
    }

    /// Extract entities using the technology dictionary
    fn extract_by_dictionary(&self, text: &str) -> Vec<EntityMatch> {
        let mut entities = Vec::new();

        for entry in &self.dictionary {
            for matcher in &entry.matchers {
                for mat in matcher.find_iter(text) {
                    entities.push(EntityMatch {
                        text: mat.as_str().to_string(),
                        category: entry.category,
                        start: mat.start(),
                        end: mat.end(),
                        confidence: entry.confidence,
                    });
                }
            }
        }

        entities
    }

    /// Remove overlapping matches, keeping the highest confidence
    fn deduplicate(&self, mut entities: Vec<EntityMatch>) -> Vec<EntityMatch> {
        entities.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(b.confidence.total_cmp(&a.confidence))
        });

        let mut result = Vec::new();
        let mut covered: HashSet<usize> = HashSet::new();

        for entity in entities {
            let overlaps = (entity.start..entity.end).any(|i| covered.contains(&i));

            if !overlaps {
                for i in entity.start..entity.end {
                    covered.insert(i);
                }
                result.push(entity);
            }
        }

        result.sort_by_key(|e| e.start);
        result
    }
}

impl Default for RuleBasedNer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor for RuleBasedNer {
    fn extract(&self, text: &str) -> Result<Vec<EntityRecord>> {
        let mut entities = self.extract_by_patterns(text);
        entities.extend(self.extract_by_dictionary(text));

        let entities = self.deduplicate(entities);

        Ok(entities
            .into_iter()
            .map(|m| EntityRecord::new(m.text, m.category))
            .collect())
    }
}

// ============================================================================
// Tests
// ============================================================================
