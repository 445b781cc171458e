//! Entity classification and cleanup
//!
//! Maps raw entity categories into the three domain buckets, normalizes
//! surface forms, drops bucket-specific noise, and aggregates to
//! frequency tables. Cleaning is order-independent and idempotent:
//! reapplying it to already-cleaned output changes nothing.

use once_cell::sync::Lazy;
use regex::Regex;

use scigap_core::{EntityCategory, EntityRecord, FrequencyTable};

/// The three domain buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Authors,
    Institutions,
    Technologies,
}

// Per-bucket stop-lists. Tuned against real extraction noise
// (figure/table captions, page furniture, bibliography fragments);
// change them only as a deliberate re-tuning.
const AUTHOR_STOPLIST: &[&str] = &[
    "fig",
    "table",
    "al",
    "page",
    "contributed",
    "applications",
    "et al",
];

const INSTITUTION_STOPLIST: &[&str] = &["fig", "page", "al", "doi"];

const TECHNOLOGY_STOPLIST: &[&str] = &["by", "table", "page"];

static NON_ALNUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("alnum regex"));

static URL_OR_DOI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://|www\.|doi\.org|\b10\.\d{4,9}/").expect("url regex")
});

static DATE_SHAPED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:\d{1,2} )?(?:january|february|march|april|may|june|july|august|september|october|november|december)(?: \d{2,4})?$|^\d{1,2} \d{1,2} \d{2,4}$",
    )
    .expect("date regex")
});

/// Normalize an entity surface form: non-alphanumeric runs become a
/// single space, then trim and lowercase.
pub fn normalize_entity(text: &str) -> String {
    NON_ALNUM_RE
        .replace_all(text, " ")
        .trim()
        .to_lowercase()
}

/// True when every token of the normalized string is a digit run.
fn is_purely_numeric(normalized: &str) -> bool {
    !normalized.is_empty()
        && normalized
            .split(' ')
            .all(|tok| !tok.is_empty() && tok.chars().all(|c| c.is_ascii_digit()))
}

/// A normalized entry is stop-listed when the whole string matches an
/// entry, or any of its tokens matches a single-word entry. That is how
/// "fig 1" falls to "fig" while "jane doe" survives.
fn is_stoplisted(normalized: &str, stoplist: &[&str]) -> bool {
    if stoplist.contains(&normalized) {
        return true;
    }
    normalized
        .split(' ')
        .any(|tok| stoplist.iter().any(|entry| !entry.contains(' ') && *entry == tok))
}

/// Classified and cleaned entity tables for one document
#[derive(Debug, Clone, Default)]
pub struct ClassifiedEntities {
    pub authors: FrequencyTable,
    pub institutions: FrequencyTable,
    pub technologies: FrequencyTable,
    /// Technologies with a post-filter count of exactly one
    pub emergent_technologies: Vec<String>,
}

/// Entity classifier/cleaner
#[derive(Debug, Clone)]
pub struct EntityClassifier {
    /// Retention floor for author/institution entries; singleton
    /// mentions below it are treated as noise
    min_entity_count: u64,
}

impl EntityClassifier {
    pub fn new(min_entity_count: u64) -> Self {
        Self { min_entity_count }
    }

    /// Classify raw records into the three buckets and clean each.
    pub fn classify(&self, records: &[EntityRecord]) -> ClassifiedEntities {
        let mut authors = FrequencyTable::new();
        let mut institutions = FrequencyTable::new();
        let mut technologies = FrequencyTable::new();

        for record in records {
            let bucket = match record.category {
                EntityCategory::Person => &mut authors,
                EntityCategory::Organization => &mut institutions,
                c if c.is_technology_like() => &mut technologies,
                _ => continue,
            };
            *bucket.entry(record.text.clone()).or_insert(0) += 1;
        }

        let authors = self.clean(Bucket::Authors, &authors);
        let institutions = self.clean(Bucket::Institutions, &institutions);
        let technologies = self.clean(Bucket::Technologies, &technologies);

        let emergent_technologies = technologies
            .iter()
            .filter(|(_, count)| **count == 1)
            .map(|(name, _)| name.clone())
            .collect();

        ClassifiedEntities {
            authors,
            institutions,
            technologies,
            emergent_technologies,
        }
    }

    /// Clean one frequency table: normalize keys (merging counts), drop
    /// noise, and apply the bucket's retention rule.
    ///
    /// Idempotent: normalization is identity on normalized keys and all
    /// filters pass everything they previously passed.
    pub fn clean(&self, bucket: Bucket, table: &FrequencyTable) -> FrequencyTable {
        let mut cleaned = FrequencyTable::new();

        for (raw, count) in table {
            if bucket == Bucket::Institutions && URL_OR_DOI_RE.is_match(raw) {
                continue;
            }

            let normalized = normalize_entity(raw);
            if normalized.is_empty() {
                continue;
            }

            let noisy = match bucket {
                Bucket::Authors => is_stoplisted(&normalized, AUTHOR_STOPLIST),
                Bucket::Institutions => is_stoplisted(&normalized, INSTITUTION_STOPLIST),
                Bucket::Technologies => {
                    is_stoplisted(&normalized, TECHNOLOGY_STOPLIST)
                        || is_purely_numeric(&normalized)
                        || DATE_SHAPED_RE.is_match(&normalized)
                }
            };
            if noisy {
                continue;
            }

            *cleaned.entry(normalized).or_insert(0) += count;
        }

        // Technologies keep singletons; they feed the emergent list
        if bucket != Bucket::Technologies {
            cleaned.retain(|_, count| *count >= self.min_entity_count);
        }

        cleaned
    }
}

impl Default for EntityClassifier {
    fn default() -> Self {
        Self::new(scigap_core::AnalysisConfig::default().min_entity_count)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use scigap_core::EntityCategory;

    fn table(entries: &[(&str, u64)]) -> FrequencyTable {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_normalization_collapses_punctuation() {
        assert_eq!(normalize_entity("Fig. 1"), "fig 1");
        assert_eq!(normalize_entity("  Jane   Doe  "), "jane doe");
        assert_eq!(normalize_entity("U.S.-based"), "u s based");
    }

    #[test]
    fn test_author_stoplist_drops_figure_references() {
        let classifier = EntityClassifier::new(2);
        let cleaned = classifier.clean(
            Bucket::Authors,
            &table(&[("Fig. 1", 5), ("Jane Doe", 3)]),
        );

        assert_eq!(cleaned.get("jane doe"), Some(&3));
        assert!(!cleaned.contains_key("fig 1"));
        assert_eq!(cleaned.len(), 1);
    }

    #[test]
    fn test_raw_surface_forms_merge_after_normalization() {
        let classifier = EntityClassifier::new(2);
        let cleaned = classifier.clean(
            Bucket::Authors,
            &table(&[("Jane Doe", 2), ("jane doe.", 1)]),
        );
        assert_eq!(cleaned.get("jane doe"), Some(&3));
    }

    #[test]
    fn test_singleton_authors_are_noise() {
        let classifier = EntityClassifier::new(2);
        let cleaned = classifier.clean(
            Bucket::Authors,
            &table(&[("Jane Doe", 3), ("Passing Mention", 1)]),
        );
        assert!(cleaned.contains_key("jane doe"));
        assert!(!cleaned.contains_key("passing mention"));
    }

    #[test]
    fn test_institutions_drop_urls_and_dois() {
        let classifier = EntityClassifier::new(2);
        let cleaned = classifier.clean(
            Bucket::Institutions,
            &table(&[
                ("https://example.org/lab", 4),
                ("doi.org/10.1000/x", 3),
                ("Kyoto University", 2),
            ]),
        );
        assert_eq!(cleaned.get("kyoto university"), Some(&2));
        assert_eq!(cleaned.len(), 1);
    }

    #[test]
    fn test_technologies_keep_singletons_and_drop_dates() {
        let classifier = EntityClassifier::new(2);
        let cleaned = classifier.clean(
            Bucket::Technologies,
            &table(&[
                ("blockchain", 1),
                ("2021", 7),
                ("March 2021", 2),
                ("12/03/2021", 2),
                ("by", 9),
            ]),
        );
        assert_eq!(cleaned.get("blockchain"), Some(&1));
        assert_eq!(cleaned.len(), 1);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let classifier = EntityClassifier::new(2);
        let raw = table(&[
            ("Fig. 1", 5),
            ("Jane Doe", 2),
            ("jane doe", 1),
            ("Table 2", 4),
            ("Maria Silva", 6),
        ]);

        let once = classifier.clean(Bucket::Authors, &raw);
        let twice = classifier.clean(Bucket::Authors, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_classify_buckets_and_emergent_list() {
        let classifier = EntityClassifier::new(2);
        let records = vec![
            EntityRecord::new("Jane Doe", EntityCategory::Person),
            EntityRecord::new("Jane Doe", EntityCategory::Person),
            EntityRecord::new("Kyoto University", EntityCategory::Organization),
            EntityRecord::new("Kyoto University", EntityCategory::Organization),
            EntityRecord::new("blockchain", EntityCategory::Technology),
            EntityRecord::new("blockchain", EntityCategory::Technology),
            EntityRecord::new("digital twin", EntityCategory::Technology),
            EntityRecord::new("2021", EntityCategory::Date),
        ];

        let classified = classifier.classify(&records);

        assert_eq!(classified.authors.get("jane doe"), Some(&2));
        assert_eq!(classified.institutions.get("kyoto university"), Some(&2));
        assert_eq!(classified.technologies.get("blockchain"), Some(&2));
        assert_eq!(classified.technologies.get("digital twin"), Some(&1));
        assert_eq!(
            classified.emergent_technologies,
            vec!["digital twin".to_string()]
        );
        // Date records never reach a bucket
        assert!(!classified.technologies.contains_key("2021"));
    }

    #[test]
    fn test_classification_is_order_independent() {
        let classifier = EntityClassifier::new(2);
        let mut records = vec![
            EntityRecord::new("Jane Doe", EntityCategory::Person),
            EntityRecord::new("Maria Silva", EntityCategory::Person),
            EntityRecord::new("Jane Doe", EntityCategory::Person),
            EntityRecord::new("Maria Silva", EntityCategory::Person),
        ];

        let forward = classifier.classify(&records);
        records.reverse();
        let backward = classifier.classify(&records);

        assert_eq!(forward.authors, backward.authors);
    }
}
