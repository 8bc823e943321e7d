//! `{{token}}` substitution
//!
//! One pass over the template; substituted values are never rescanned, so a
//! value that itself contains `{{...}}` is emitted literally. A token with no
//! value becomes a visible `[REQUIRED: key]` marker so the gap survives into
//! the output and is caught by the compliance validator.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use shared_types::placeholder::required_marker;
use std::collections::HashMap;

lazy_static! {
    // Same span as the validator's unresolved-token pattern, including `{{}}`
    static ref TOKEN: Regex = Regex::new(r"\{\{\s*([^{}]*?)\s*\}\}").unwrap();
    static ref EXTRA_BLANK_LINES: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Result of filling one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledTemplate {
    pub text: String,
    /// Keys that had no value, in first-occurrence order
    pub unfilled: Vec<String>,
}

impl FilledTemplate {
    pub fn is_complete(&self) -> bool {
        self.unfilled.is_empty()
    }
}

/// Replace every `{{key}}` with `data[key]`, or `[REQUIRED: key]` if absent
pub fn fill(template: &str, data: &HashMap<String, String>) -> String {
    fill_tracked(template, data).text
}

/// [`fill`], also reporting which keys were left unfilled
pub fn fill_tracked(template: &str, data: &HashMap<String, String>) -> FilledTemplate {
    let mut unfilled: Vec<String> = Vec::new();
    let text = TOKEN
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            match data.get(key) {
                Some(value) => value.clone(),
                None => {
                    if !unfilled.iter().any(|k| k == key) {
                        unfilled.push(key.to_string());
                    }
                    required_marker(key)
                }
            }
        })
        .into_owned();

    FilledTemplate { text, unfilled }
}

/// Distinct token keys a template references, in first-occurrence order
pub fn template_tokens(template: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for caps in TOKEN.captures_iter(template) {
        let key = caps[1].to_string();
        if !key.is_empty() && !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Strip trailing spaces and collapse blank-line runs left by empty optional values
pub fn tidy(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    EXTRA_BLANK_LINES
        .replace_all(&lines.join("\n"), "\n\n")
        .trim()
        .to_string()
}
