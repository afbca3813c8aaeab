//! Character-based string helpers.
//!
//! Description budgets are counted in characters, not bytes, so a
//! description full of accented roast names is not cut short.

/// Number of characters (Unicode scalar values) in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Prefix of `s` holding at most `n` characters.
///
/// Never splits a multi-byte character.
pub fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Format count with noun, handling pluralization
///
/// - `plural_count(0, "record")` -> `"0 records"`
/// - `plural_count(1, "record")` -> `"1 record"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
