//! Canonical comparison keys for artist and title strings.
//!
//! Every provider compares and builds URLs against the same normalized
//! forms: diacritics folded to ASCII, lowercased, with artist/title
//! specific trimming on top. All functions here are pure; `fold` is
//! idempotent, while the artist/title keys apply their trimming exactly
//! once per call.

use once_cell::sync::Lazy;
use regex::Regex;

/// First parenthesized group in a title, e.g. "Song (Live)" -> "Song".
static PAREN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\([^)]*\)").expect("paren regex"));

static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("space regex"));

#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    transliterate: bool,
}

impl Normalizer {
    pub fn new(transliterate: bool) -> Self {
        Self { transliterate }
    }

    /// Lowercase, and when transliteration is enabled, fold accented and
    /// non-Latin characters to their closest ASCII equivalents.
    pub fn fold(&self, s: &str) -> String {
        let lowered = if self.transliterate {
            secular::lower_lay_string(s)
        } else {
            s.to_lowercase()
        };
        MULTI_SPACE.replace_all(lowered.trim(), " ").into_owned()
    }

    /// Comparison key for an artist name: folded, with one leading
    /// "the " removed. The prefix is stripped exactly once per call, so
    /// "The The Band" keeps its second "the".
    pub fn artist_key(&self, s: &str) -> String {
        let folded = self.fold(s);
        match folded.strip_prefix("the ") {
            Some(rest) => rest.trim_start().to_string(),
            None => folded,
        }
    }

    /// Comparison key for a title: folded, with the first parenthesized
    /// suffix removed ("Song (Remastered)" matches "Song"). Only the
    /// first group is stripped; any further groups stay.
    pub fn title_key(&self, s: &str) -> String {
        let folded = self.fold(s);
        PAREN_RE.replacen(&folded, 1, "").trim().to_string()
    }
}

/// Keep only ASCII alphanumeric characters. Used by providers whose URLs
/// are built from bare path segments.
pub fn alnum(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Split a comma-separated artist field into trimmed alternatives,
/// preserving order.
pub fn split_artists(s: &str) -> Vec<String> {
    s.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}
