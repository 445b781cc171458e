//! Section segmentation
//!
//! Scans normalized text for heading occurrences drawn from a fixed
//! vocabulary of section names and synonyms, and maps each heading to
//! the body that runs up to the next recognized heading. Bodies are
//! truncated at the first references heading so bibliography text never
//! leaks into the analysis.

use once_cell::sync::Lazy;
use regex::Regex;

use scigap_core::{SectionKind, SectionMap};

use crate::normalize::strip_reference_noise;

// Longest synonyms first; the alternation is matched case-insensitively
// against case-preserving normalized text. An optional numbered or
// lettered prefix ("3.2", "IV.", "B)") and optional trailing ":" or "."
// are part of the heading, not the body.
static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:\b(?:\d+(?:\.\d+)*|[ivx]+|[a-z])\s*[.)]\s*)?\b(?P<name>results?\s+and\s+discussions?|discussion\s+and\s+results|conclusions?\s+and\s+recommendations|conclusion\s+and\s+future\s+work|concluding\s+remarks|limitations?\s+of\s+the\s+study|study\s+limitations|discussions?|conclusions?|limitations?|results)\b\s*[:.]?",
    )
    .expect("heading regex")
});

// Spaced-out letters ("R E F E R E N C E S") are common in extracted
// PDF text; \s* also matches the plain form.
static REFERENCES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\br\s*e\s*f\s*e\s*r\s*e\s*n\s*c\s*e\s*s\b|\bbibliography\b")
        .expect("references regex")
});

/// Heading-driven section segmenter.
///
/// Best-effort by design: headings can be missed (unusual phrasing) and
/// body text that happens to contain a vocabulary word produces a false
/// split. No headings found is a valid outcome, not an error.
#[derive(Debug, Default)]
pub struct SectionSegmenter;

impl SectionSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Split normalized text into canonical sections.
    ///
    /// When the same canonical name matches more than once, the last
    /// occurrence's body wins.
    pub fn segment(&self, text: &str) -> SectionMap {
        let matches: Vec<(SectionKind, usize, usize)> = HEADING_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.name("name")?.as_str();
                let kind = canonical_kind(name)?;
                Some((kind, whole.start(), whole.end()))
            })
            .collect();

        let mut sections = SectionMap::new();
        for (i, (kind, _, body_start)) in matches.iter().enumerate() {
            let body_end = matches
                .get(i + 1)
                .map(|(_, next_start, _)| *next_start)
                .unwrap_or(text.len());

            let body = &text[*body_start..body_end];
            let body = truncate_at_references(body);
            let body = strip_reference_noise(body);

            tracing::debug!(section = %kind, bytes = body.len(), "segmented section");
            sections.insert(kind.as_str().to_string(), body);
        }

        sections
    }
}

/// Collapse a matched heading name to its canonical section kind.
fn canonical_kind(name: &str) -> Option<SectionKind> {
    let name = name.to_lowercase();
    if name.contains("discussion") || name == "results" {
        Some(SectionKind::Discussion)
    } else if name.contains("conclu") {
        Some(SectionKind::Conclusion)
    } else if name.contains("limitation") {
        Some(SectionKind::Limitation)
    } else {
        None
    }
}

/// Cut the body at the first references heading, if one appears inside.
fn truncate_at_references(body: &str) -> &str {
    match REFERENCES_RE.find(body) {
        Some(m) => &body[..m.start()],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> SectionMap {
        SectionSegmenter::new().segment(text)
    }

    #[test]
    fn test_synonyms_collapse_to_canonical_names() {
        for heading in ["Results and Discussions", "discussion", "DISCUSSIONS"] {
            let text = format!("intro text {heading} the interesting part");
            let sections = segment(&text);
            assert_eq!(
                sections.get("discussion").map(String::as_str),
                Some("the interesting part"),
                "heading {heading:?} should map to discussion"
            );
        }
    }

    #[test]
    fn test_conclusion_recommendations_synonym() {
        let sections = segment("start Conclusions and Recommendations: wrap up here");
        assert_eq!(
            sections.get("conclusion").map(String::as_str),
            Some("wrap up here")
        );
    }

    #[test]
    fn test_limitations_of_the_study_synonym() {
        let sections = segment("body Limitations of the Study small sample size");
        assert_eq!(
            sections.get("limitation").map(String::as_str),
            Some("small sample size")
        );
    }

    #[test]
    fn test_numbered_heading_prefix() {
        let sections = segment("intro 3.2 Discussion. findings here 4. Conclusion done");
        assert_eq!(
            sections.get("discussion").map(String::as_str),
            Some("findings here")
        );
        assert_eq!(sections.get("conclusion").map(String::as_str), Some("done"));
    }

    #[test]
    fn test_body_truncated_at_references() {
        let sections = segment("x Conclusion body text References junk that must not leak");
        assert_eq!(
            sections.get("conclusion").map(String::as_str),
            Some("body text")
        );
    }

    #[test]
    fn test_spaced_out_references_heading() {
        let sections = segment("x Limitations body here R E F E R E N C E S [1] junk");
        assert_eq!(
            sections.get("limitation").map(String::as_str),
            Some("body here")
        );
    }

    #[test]
    fn test_no_headings_yields_empty_map() {
        assert!(segment("just prose without any recognized heading").is_empty());
    }

    #[test]
    fn test_last_occurrence_wins() {
        let sections = segment("Discussion first body Conclusion middle Discussion second body");
        assert_eq!(
            sections.get("discussion").map(String::as_str),
            Some("second body")
        );
    }

    #[test]
    fn test_body_runs_to_end_of_document() {
        let sections = segment("intro Conclusion everything to the end");
        assert_eq!(
            sections.get("conclusion").map(String::as_str),
            Some("everything to the end")
        );
    }

    #[test]
    fn test_body_loses_citation_markers_and_urls() {
        let sections =
            segment("x Discussion finding [12] at https://example.org/paper more text");
        assert_eq!(
            sections.get("discussion").map(String::as_str),
            Some("finding at more text")
        );
    }
}
