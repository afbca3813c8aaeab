//! Per-content-type interception rules.
//!
//! A rule names the fields the interceptor cares about for one content type.
//! Rules are plain configuration: the same generic interceptor consumes all
//! of them.

use crate::content::{ContentType, FieldMap};
use serde::{Deserialize, Serialize};

/// Long-text field shortened to the description budget.
pub const META_DESCRIPTION_FIELD: &str = "meta_description";
/// SEO title field.
pub const META_TITLE_FIELD: &str = "meta_title";
/// First-publication timestamp field.
pub const PUBLISHED_FIELD: &str = "publishedAt";

/// Fields consulted when intercepting writes to one content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptRule {
    pub content_type: ContentType,

    /// Field whose string value is kept within the description budget.
    #[serde(default = "default_long_text_field")]
    pub long_text_field: String,

    /// Fields an update may touch while still counting as metadata-only.
    #[serde(default = "default_metadata_fields")]
    pub metadata_fields: Vec<String>,

    /// Timestamp re-applied on metadata-only updates.
    #[serde(default = "default_published_field")]
    pub published_field: String,
}

fn default_long_text_field() -> String {
    META_DESCRIPTION_FIELD.into()
}

fn default_metadata_fields() -> Vec<String> {
    vec![META_TITLE_FIELD.into(), META_DESCRIPTION_FIELD.into()]
}

fn default_published_field() -> String {
    PUBLISHED_FIELD.into()
}

impl InterceptRule {
    /// Rule with the default field names.
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            long_text_field: default_long_text_field(),
            metadata_fields: default_metadata_fields(),
            published_field: default_published_field(),
        }
    }

    /// One default rule per content type.
    pub fn defaults() -> Vec<Self> {
        ContentType::ALL.into_iter().map(Self::new).collect()
    }

    /// Whether a write only touches SEO metadata.
    ///
    /// True iff every written field is in the allow-list. The published
    /// timestamp itself is ignored so a caller-supplied value can still be
    /// overwritten with the stored one.
    pub fn is_metadata_only(&self, fields: &FieldMap) -> bool {
        fields
            .keys()
            .filter(|name| **name != self.published_field)
            .all(|name| self.metadata_fields.iter().any(|m| m == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> FieldMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_defaults_cover_all_types() {
        let rules = InterceptRule::defaults();
        assert_eq!(rules.len(), 5);
        assert!(rules.iter().all(|r| r.long_text_field == "meta_description"));
        assert_eq!(rules[0].content_type, ContentType::Article);
    }

    #[test]
    fn test_metadata_only() {
        let rule = InterceptRule::new(ContentType::Article);
        assert!(rule.is_metadata_only(&fields(json!({
            "meta_title": "Flat white",
            "meta_description": "Velvety milk, double ristretto."
        }))));
        assert!(rule.is_metadata_only(&fields(json!({ "meta_title": "Flat white" }))));
    }

    #[test]
    fn test_content_field_makes_full_edit() {
        let rule = InterceptRule::new(ContentType::Article);
        assert!(!rule.is_metadata_only(&fields(json!({
            "description": "Body text",
            "meta_description": "Short"
        }))));
    }

    #[test]
    fn test_published_field_is_neutral() {
        let rule = InterceptRule::new(ContentType::Recipe);
        assert!(rule.is_metadata_only(&fields(json!({
            "meta_title": "Cold brew",
            "publishedAt": "2025-05-05T00:00:00Z"
        }))));
    }

    #[test]
    fn test_empty_write_is_metadata_only() {
        let rule = InterceptRule::new(ContentType::Guide);
        assert!(rule.is_metadata_only(&FieldMap::new()));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let rule: InterceptRule = toml::from_str("content_type = \"product\"").unwrap();
        assert_eq!(rule, InterceptRule::new(ContentType::Product));

        let rule: InterceptRule = toml::from_str(
            "content_type = \"guide\"\nlong_text_field = \"seo_summary\"\nmetadata_fields = [\"seo_summary\"]",
        )
        .unwrap();
        assert_eq!(rule.long_text_field, "seo_summary");
        assert_eq!(rule.published_field, "publishedAt");
    }
}
