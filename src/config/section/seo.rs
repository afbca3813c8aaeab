//! `[seo]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [seo]
//! description_limit = 160          # character budget for meta descriptions
//! extra_filler = ["must-have"]     # dropped before truncating
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::seo::{DEFAULT_LIMIT, Shortener};
use serde::{Deserialize, Serialize};

/// Smallest budget that leaves room for one character and an ellipsis.
pub const MIN_DESCRIPTION_LIMIT: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoSectionConfig {
    /// Character budget for long-text fields.
    pub description_limit: usize,

    /// Additional filler phrases, removed like the built-in ones.
    pub extra_filler: Vec<String>,
}

impl Default for SeoSectionConfig {
    fn default() -> Self {
        Self {
            description_limit: DEFAULT_LIMIT,
            extra_filler: Vec::new(),
        }
    }
}

impl SeoSectionConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.description_limit < MIN_DESCRIPTION_LIMIT {
            diag.error_with_hint(
                FieldPath::new("seo.description_limit"),
                format!(
                    "must be at least {MIN_DESCRIPTION_LIMIT}, got {}",
                    self.description_limit
                ),
                format!("search snippets fit about {DEFAULT_LIMIT} characters"),
            );
        }

        for (i, phrase) in self.extra_filler.iter().enumerate() {
            if phrase.trim().is_empty() {
                diag.warn(
                    FieldPath::new(format!("seo.extra_filler[{i}]")),
                    "empty phrase is ignored",
                );
            }
        }
    }

    /// Build the shortener with the configured extra filler.
    pub fn shortener(&self) -> Result<Shortener, regex::Error> {
        Shortener::with_extra_filler(&self.extra_filler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SeoSectionConfig::default();
        assert_eq!(config.description_limit, 160);
        assert!(config.extra_filler.is_empty());
    }

    #[test]
    fn test_limit_too_small() {
        let config = SeoSectionConfig {
            description_limit: 3,
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "seo.description_limit");
    }

    #[test]
    fn test_empty_filler_warns() {
        let config = SeoSectionConfig {
            extra_filler: vec!["  ".into()],
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert!(diag.is_empty());
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn test_shortener_uses_extra_filler() {
        let config = SeoSectionConfig {
            extra_filler: vec!["award-winning".into()],
            ..Default::default()
        };
        let shortener = config.shortener().unwrap();
        assert_eq!(shortener.condense("An award-winning roaster"), "An roaster");
    }
}
