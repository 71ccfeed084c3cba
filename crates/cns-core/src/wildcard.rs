//! `*` wildcard matching
//!
//! `*` matches any run of characters, including none. Nothing else in a
//! pattern is special: every other character, regex metacharacters included,
//! matches itself.

use regex::Regex;

/// Test `text` against a wildcard `pattern`
///
/// A pattern that cannot be compiled (only possible for pathological sizes)
/// matches nothing.
pub fn matches(text: &str, pattern: &str) -> bool {
    compile(pattern)
        .map(|regex| regex.is_match(text))
        .unwrap_or(false)
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{}$", body))
}

/// Wrap a filter so it matches anywhere in a name
pub fn contains_pattern(filter: &str) -> String {
    format!("*{}*", filter)
}
