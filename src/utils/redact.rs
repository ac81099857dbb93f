//! Redaction of credentials before server payloads reach the logs.

use regex::Regex;
use std::sync::LazyLock;

/// Sensitive data patterns and their replacements
static SENSITIVE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r#"(?i)"(password|token|x-access-token|authorization)":\s*"[^"]*""#, r#""$1": "[REDACTED]""#),
        (r"(?i)\bbasic\s+[A-Za-z0-9+/=]+", "Basic [REDACTED]"),
        (r"\beyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*", "[REDACTED_TOKEN]"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Redact tokens and credentials from a string destined for a log line
pub fn redact_sensitive_data(input: &str) -> String {
    let mut result = input.to_string();

    for (re, replacement) in SENSITIVE_PATTERNS.iter() {
        result = re.replace_all(&result, *replacement).into_owned();
    }

    result
}
