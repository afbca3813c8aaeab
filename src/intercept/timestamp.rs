//! Publish-timestamp preservation.
//!
//! A record is *published* once its timestamp field holds a non-empty value.
//! Metadata-only updates to a published record get the stored timestamp
//! written back, so an SEO tweak never looks like a fresh publication.
//! Full content edits are left alone.
//!
//! Reading the stored record is best effort: a missing record or a storage
//! failure skips the rule and the write goes through unchanged.

use super::InterceptRule;
use crate::content::UpdateOperation;
use crate::store::ContentStore;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// What the preservation rule did for one update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum TimestampAction {
    /// Create, full content edit, or no rule for the content type.
    NotApplicable,
    /// Stored timestamp was written onto the outgoing fields.
    Preserved(Value),
    /// Stored record has never been published.
    Unpublished,
    /// Stored record could not be read; fields left untouched.
    Skipped(SkipReason),
}

/// Why the stored timestamp could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotFound,
    Fetch(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("record not found"),
            Self::Fetch(err) => write!(f, "fetch failed: {err}"),
        }
    }
}

/// Empty means absent, `null`, or a blank string.
pub fn is_empty_timestamp(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Re-apply the stored timestamp on a metadata-only update.
///
/// Callers decide whether the update is metadata-only; this only performs
/// the read and the overwrite.
pub fn preserve_published<S: ContentStore + ?Sized>(
    rule: &InterceptRule,
    op: &mut UpdateOperation,
    store: &S,
) -> TimestampAction {
    let stored = match store.find_one(op.content_type, &op.id) {
        Ok(Some(record)) => record,
        Ok(None) => {
            crate::log!("warning"; "{} `{}`: not found, {} left as sent",
                op.content_type, op.id, rule.published_field);
            return TimestampAction::Skipped(SkipReason::NotFound);
        }
        Err(err) => {
            crate::log!("warning"; "{} `{}`: could not read {}: {}",
                op.content_type, op.id, rule.published_field, err);
            return TimestampAction::Skipped(SkipReason::Fetch(err.to_string()));
        }
    };

    let published = stored.fields.get(&rule.published_field);
    if is_empty_timestamp(published) {
        return TimestampAction::Unpublished;
    }

    let value = published.cloned().unwrap_or(Value::Null);
    op.fields
        .insert(rule.published_field.clone(), value.clone());
    crate::debug!("intercept"; "{} `{}`: kept {} = {}",
        op.content_type, op.id, rule.published_field, value);
    TimestampAction::Preserved(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_empty_timestamp() {
        assert!(is_empty_timestamp(None));
        assert!(is_empty_timestamp(Some(&json!(null))));
        assert!(is_empty_timestamp(Some(&json!(""))));
        assert!(is_empty_timestamp(Some(&json!("   "))));
        assert!(!is_empty_timestamp(Some(&json!("2024-01-01T00:00:00Z"))));
        assert!(!is_empty_timestamp(Some(&json!(1704067200))));
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::NotFound.to_string(), "record not found");
        assert_eq!(
            SkipReason::Fetch("timeout".into()).to_string(),
            "fetch failed: timeout"
        );
    }
}
