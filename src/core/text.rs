//! Markup-to-plain-text helpers shared by all providers.

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("html tag regex"));

/// A `<br>` plus the source newline that usually follows it; both together
/// mean one line break, not two.
static BR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>[ \t]*\r?\n?").expect("br regex"));

static NUMERIC_ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#([xX][0-9a-fA-F]+|\d+);").expect("numeric entity regex"));

static CLOSE_P_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</p>").expect("close p regex"));

static CLOSE_DIV_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</div>").expect("close div regex"));

static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("blank run regex"));

/// Substring between two fixed markers, exclusive. The marker-delimited
/// extraction primitive: brittle against upstream markup changes, which is
/// acceptable because a failed slice is just a not-found.
pub fn between<'a>(haystack: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = haystack.find(start)? + start.len();
    let len = haystack[from..].find(end)?;
    Some(&haystack[from..from + len])
}

/// Reduce an HTML fragment to plain lyrics text: line breaks preserved,
/// every other tag dropped, entities decoded, blank-line runs collapsed.
pub fn strip_markup(fragment: &str) -> String {
    let with_newlines = BR_RE.replace_all(fragment, "\n");
    let with_newlines = CLOSE_P_RE.replace_all(&with_newlines, "\n\n");
    let with_newlines = CLOSE_DIV_RE.replace_all(&with_newlines, "\n");
    let stripped = HTML_TAG_RE.replace_all(&with_newlines, "");
    let decoded = decode_entities(&stripped);

    let trimmed_lines: Vec<&str> = decoded.lines().map(|l| l.trim()).collect();
    let joined = trimmed_lines.join("\n");
    BLANK_RUN_RE.replace_all(&joined, "\n\n").trim().to_string()
}

/// Decode the named entities that actually occur in lyrics pages plus
/// decimal/hex numeric references.
pub fn decode_entities(s: &str) -> String {
    let named = s
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&hellip;", "…")
        .replace("&ndash;", "–")
        .replace("&mdash;", "—")
        .replace("&rsquo;", "'")
        .replace("&lsquo;", "'")
        .replace("&rdquo;", "\"")
        .replace("&ldquo;", "\"");

    let numeric = NUMERIC_ENTITY_RE.replace_all(&named, |caps: &regex::Captures| {
        let body = &caps[1];
        let code = if let Some(hex) = body.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()
        } else {
            body.parse::<u32>().ok()
        };
        match code.and_then(char::from_u32) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    });

    // &amp; last so "&amp;quot;" does not turn into a quote
    numeric.replace("&amp;", "&")
}
