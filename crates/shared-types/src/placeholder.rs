// Placeholder markers shared by the template engine and the compliance validator

/// Opening delimiter of a template token, as in `{{client_name}}`
pub const TOKEN_OPEN: &str = "{{";

/// Closing delimiter of a template token
pub const TOKEN_CLOSE: &str = "}}";

/// Prefix of the visible marker left where a template token had no value
pub const REQUIRED_MARKER_PREFIX: &str = "[REQUIRED: ";

/// Visible marker for an unfilled template key, e.g. `[REQUIRED: policy_limit]`
pub fn required_marker(key: &str) -> String {
    format!("{}{}]", REQUIRED_MARKER_PREFIX, key)
}

/// Bracketed stand-in for a missing name in prose, e.g. `[client name]`
pub fn name_marker(label: &str) -> String {
    format!("[{}]", label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_marker() {
        assert_eq!(required_marker("policy_limit"), "[REQUIRED: policy_limit]");
        assert!(required_marker("x").starts_with(REQUIRED_MARKER_PREFIX));
    }
}
