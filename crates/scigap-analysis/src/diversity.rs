//! Shannon-entropy diversity scoring
//!
//! One scoring function for every input shape: entity frequency tables
//! and keyword tables derived from free text both go through
//! [`shannon_entropy`]. Free text is first reduced to a keyword table
//! by running entity extraction over it and counting lowercased
//! surface forms.

use scigap_core::{FrequencyTable, Result};
use scigap_extractor::EntityExtractor;

/// Shannon entropy in bits over the distribution a frequency table
/// induces. An empty table (or one with only zero counts) scores 0.0,
/// never NaN.
pub fn shannon_entropy(table: &FrequencyTable) -> f64 {
    let total: u64 = table.values().sum();
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    table
        .values()
        .filter(|count| **count > 0)
        .map(|count| {
            let p = *count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Derive a keyword frequency table from free text: extract entities
/// and count lowercased surface forms.
pub fn keyword_frequencies(
    extractor: &dyn EntityExtractor,
    text: &str,
) -> Result<FrequencyTable> {
    let mut table = FrequencyTable::new();
    for record in extractor.extract(text)? {
        *table.entry(record.text.to_lowercase()).or_insert(0) += 1;
    }
    Ok(table)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use scigap_core::Diversity;

    fn table(entries: &[(&str, u64)]) -> FrequencyTable {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_empty_table_scores_exactly_zero() {
        assert_eq!(shannon_entropy(&FrequencyTable::new()), 0.0);
    }

    #[test]
    fn test_zero_counts_score_exactly_zero() {
        assert_eq!(shannon_entropy(&table(&[("a", 0), ("b", 0)])), 0.0);
    }

    #[test]
    fn test_single_entry_has_zero_uncertainty() {
        assert_eq!(shannon_entropy(&table(&[("only", 17)])), 0.0);
    }

    #[test]
    fn test_two_equal_entries_score_one_bit() {
        assert_eq!(shannon_entropy(&table(&[("a", 4), ("b", 4)])), 1.0);
    }

    #[test]
    fn test_uniform_ten_entries_score_log2_ten() {
        let entries: Vec<(String, u64)> =
            (0..10).map(|i| (format!("kw{i}"), 3)).collect();
        let t: FrequencyTable = entries.into_iter().collect();

        let entropy = shannon_entropy(&t);
        assert!((entropy - 10f64.log2()).abs() < 1e-9);
        assert_eq!(Diversity::from_entropy(entropy, 1.5), Diversity::High);
    }

    #[test]
    fn test_skewed_table_scores_below_uniform() {
        let uniform = shannon_entropy(&table(&[("a", 5), ("b", 5), ("c", 5)]));
        let skewed = shannon_entropy(&table(&[("a", 13), ("b", 1), ("c", 1)]));
        assert!(skewed < uniform);
    }

    proptest! {
        #[test]
        fn prop_entropy_is_non_negative(counts in proptest::collection::vec(1u64..1000, 0..32)) {
            let t: FrequencyTable = counts
                .iter()
                .enumerate()
                .map(|(i, c)| (format!("k{i}"), *c))
                .collect();
            prop_assert!(shannon_entropy(&t) >= 0.0);
        }

        #[test]
        fn prop_entropy_is_bounded_by_log2_n(counts in proptest::collection::vec(1u64..1000, 1..32)) {
            let t: FrequencyTable = counts
                .iter()
                .enumerate()
                .map(|(i, c)| (format!("k{i}"), *c))
                .collect();
            let bound = (t.len() as f64).log2();
            prop_assert!(shannon_entropy(&t) <= bound + 1e-9);
        }
    }
}
