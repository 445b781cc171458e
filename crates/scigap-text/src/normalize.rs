//! Text normalization
//!
//! Strips layout artifacts from raw extracted page text. Downstream
//! heading and entity matching depends on the exact character forms this
//! module produces, so the unicode substitution table must not change.

use once_cell::sync::Lazy;
use regex::Regex;

/// Exact substitution table for unicode punctuation and accented letters.
///
/// The accented-letter entries are identity mappings; they stay in the
/// table because the set of characters it covers is part of the contract.
const UNICODE_REPLACEMENTS: &[(char, &str)] = &[
    ('\u{2011}', "-"),  // non-breaking hyphen
    ('\u{2013}', "-"),  // en dash
    ('\u{2014}', "-"),  // em dash
    ('\u{2018}', "'"),  // left single quote
    ('\u{2019}', "'"),  // right single quote
    ('\u{201C}', "\""), // left double quote
    ('\u{201D}', "\""), // right double quote
    ('\u{00e1}', "á"),
    ('\u{00e9}', "é"),
    ('\u{00ed}', "í"),
    ('\u{00f3}', "ó"),
    ('\u{00fa}', "ú"),
    ('\u{00ef}', "ï"),
    ('\u{00fc}', "ü"),
    ('\u{00f1}', "ñ"),
];

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

// A hyphen at a line end continues a word on the next line.
static HYPHEN_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\p{Ll})-[ \t]*\r?\n[ \t]*(\p{Ll})").expect("hyphen regex"));

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:https?://|www\.)\S+").expect("url regex"));

static DOI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:doi:\s*)?10\.\d{4,9}/[-._;()/:a-z0-9]+").expect("doi regex"));

static CITATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d+(?:\s*,\s*\d+)*\]").expect("citation regex"));

/// Rewrite unicode punctuation via the fixed substitution table.
pub fn replace_unicode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    'chars: for ch in text.chars() {
        for (from, to) in UNICODE_REPLACEMENTS {
            if ch == *from {
                out.push_str(to);
                continue 'chars;
            }
        }
        out.push(ch);
    }
    out
}

/// Collapse all whitespace sequences (including newlines) to single
/// spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Remove URL-like and DOI-like substrings and bracketed numeric
/// citation markers. Applied to section bodies before analysis so
/// bibliography plumbing never reaches entity extraction.
pub fn strip_reference_noise(text: &str) -> String {
    let text = URL_RE.replace_all(text, " ");
    let text = DOI_RE.replace_all(&text, " ");
    let text = CITATION_RE.replace_all(&text, " ");
    collapse_whitespace(&text)
}

/// Produce normalized text from raw extracted page text.
///
/// Case policy: case-preserving. Heading and reference matching is done
/// case-insensitively downstream, which keeps proper-noun casing intact
/// for entity extraction over the same text.
pub fn normalize(raw: &str) -> String {
    let repaired = HYPHEN_BREAK_RE.replace_all(raw, "$1$2");
    collapse_whitespace(&replace_unicode(&repaired))
}
