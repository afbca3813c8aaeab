//! Config field paths for diagnostics.

use owo_colors::OwoColorize;
use std::fmt;

/// Dotted path of a config field, e.g. `seo.description_limit`.
///
/// Array-of-table entries use an index: `intercept[2].long_text_field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    #[inline]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Path of an element inside an array of tables.
    pub fn indexed(section: &str, index: usize, field: &str) -> Self {
        Self(format!("{section}[{index}].{field}"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed() {
        let path = FieldPath::indexed("intercept", 2, "long_text_field");
        assert_eq!(path.as_str(), "intercept[2].long_text_field");
    }
}
