//! Regex patterns and keyword detection for section quality checks

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::placeholder::REQUIRED_MARKER_PREFIX;

lazy_static! {
    /// Raw template token that was never substituted, e.g. `{{policy_limit}}`
    static ref UNRESOLVED_TOKEN: Regex = Regex::new(r"\{\{[^{}]*\}\}").unwrap();

    /// Dollar figure such as `$15,000` or `$ 250.00`
    static ref MONETARY_FIGURE: Regex = Regex::new(r"\$\s?\d").unwrap();
}

/// Deadline language keywords
pub const DEADLINE_KEYWORDS: &[&str] = &["deadline", "expire", "expiration"];

/// Proof-of-service keywords
pub const SERVICE_KEYWORDS: &[&str] = &["service", "mailed", "delivered", "sent"];

/// True when content still carries a raw `{{token}}` or a `[REQUIRED: key]` marker.
///
/// Content may come from a non-templated source, so both forms are checked.
pub fn has_unfilled_placeholder(content: &str) -> bool {
    UNRESOLVED_TOKEN.is_match(content) || content.contains(REQUIRED_MARKER_PREFIX)
}

/// Placeholder tokens and markers found in content, in order of appearance
pub fn unfilled_placeholders(content: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = UNRESOLVED_TOKEN
        .find_iter(content)
        .map(|m| (m.start(), m.as_str().to_string()))
        .collect();

    let mut offset = 0;
    while let Some(pos) = content[offset..].find(REQUIRED_MARKER_PREFIX) {
        let start = offset + pos;
        let end = content[start..]
            .find(']')
            .map(|e| start + e + 1)
            .unwrap_or(content.len());
        found.push((start, content[start..end].to_string()));
        offset = end;
    }

    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, text)| text).collect()
}

pub fn has_monetary_figure(content: &str) -> bool {
    MONETARY_FIGURE.is_match(content)
}

/// Case-insensitive whole-word regex over a keyword list, e.g.
/// `(?i)\b(?:service|mailed)(?:s|es)?\b`. Plural endings are allowed so
/// "expire" still matches "expires".
pub fn keyword_regex(keywords: &[impl AsRef<str>]) -> Option<Regex> {
    let alternatives: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .map(regex::escape)
        .collect();
    if alternatives.is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?i)\b(?:{})(?:s|es)?\b", alternatives.join("|"))).ok()
}

/// True when content contains any keyword as a whole word
pub fn contains_any_keyword(content: &str, keywords: &[impl AsRef<str>]) -> bool {
    keyword_regex(keywords).is_some_and(|re| re.is_match(content))
}
