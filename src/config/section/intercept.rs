//! `[[intercept]]` entries.
//!
//! Each entry registers one content type with the write interceptor. With no
//! entries, every content type gets the default field names.
//!
//! ```toml
//! [[intercept]]
//! content_type = "recipe"
//! long_text_field = "meta_description"
//! metadata_fields = ["meta_title", "meta_description"]
//! published_field = "publishedAt"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::intercept::InterceptRule;
use rustc_hash::FxHashSet;

const SECTION: &str = "intercept";

/// Rules in effect: configured entries, or the defaults when none are given.
pub fn effective_rules(configured: &[InterceptRule]) -> Vec<InterceptRule> {
    if configured.is_empty() {
        InterceptRule::defaults()
    } else {
        configured.to_vec()
    }
}

pub fn validate_rules(rules: &[InterceptRule], diag: &mut ConfigDiagnostics) {
    let mut seen = FxHashSet::default();

    for (i, rule) in rules.iter().enumerate() {
        if !seen.insert(rule.content_type) {
            diag.error_with_hint(
                FieldPath::indexed(SECTION, i, "content_type"),
                format!("`{}` is registered more than once", rule.content_type),
                "merge the entries into one",
            );
        }

        if rule.long_text_field.trim().is_empty() {
            diag.error(
                FieldPath::indexed(SECTION, i, "long_text_field"),
                "must not be empty",
            );
        }

        if rule.published_field.trim().is_empty() {
            diag.error(
                FieldPath::indexed(SECTION, i, "published_field"),
                "must not be empty",
            );
        }

        if rule.metadata_fields.contains(&rule.published_field) {
            diag.error_with_hint(
                FieldPath::indexed(SECTION, i, "metadata_fields"),
                format!(
                    "contains the published field `{}`",
                    rule.published_field
                ),
                "the published timestamp is handled separately, remove it from the list",
            );
        }

        if rule.metadata_fields.is_empty() {
            diag.warn(
                FieldPath::indexed(SECTION, i, "metadata_fields"),
                "empty: no update will count as metadata-only",
            );
        }
    }
}
