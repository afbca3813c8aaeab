//! Pre-write interception for CMS content.
//!
//! Every create/update headed for a configured content type passes through
//! [`Interceptor`] before it reaches storage:
//!
//! ```text
//! fields ──► shorten long-text field ──► metadata-only? ──► re-apply publishedAt ──► store
//!            (create + update)           (update only)      (best effort)
//! ```
//!
//! The interceptor never fails a write. Storage read errors during timestamp
//! preservation are logged and the fields pass through as they were.
//!
//! # Module Structure
//!
//! | Module      | Purpose                                   |
//! |-------------|-------------------------------------------|
//! | `rule`      | `InterceptRule` field configuration       |
//! | `timestamp` | Publish-timestamp preservation            |
//! | `pipeline`  | `WritePipeline` (intercept, then persist) |

mod pipeline;
mod rule;
mod timestamp;

pub use pipeline::WritePipeline;
pub use rule::{InterceptRule, META_DESCRIPTION_FIELD, META_TITLE_FIELD, PUBLISHED_FIELD};
pub use timestamp::{SkipReason, TimestampAction, is_empty_timestamp};

use crate::content::{ContentType, FieldMap, UpdateOperation};
use crate::seo::{DEFAULT_LIMIT, Shortener};
use crate::store::ContentStore;
use crate::utils::text::char_len;
use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::Value;

/// A long-text field rewritten to fit the budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortened {
    pub field: String,
    /// Character count before shortening.
    pub before: usize,
    /// Character count after shortening.
    pub after: usize,
}

/// Outcome of intercepting one write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterceptReport {
    pub content_type: ContentType,
    /// False when no rule is configured for the content type.
    pub intercepted: bool,
    pub shortened: Option<Shortened>,
    pub timestamp: TimestampAction,
}

impl InterceptReport {
    fn pass_through(content_type: ContentType) -> Self {
        Self {
            content_type,
            intercepted: false,
            shortened: None,
            timestamp: TimestampAction::NotApplicable,
        }
    }

    /// Whether the outgoing fields were modified.
    pub fn modified(&self) -> bool {
        self.shortened.is_some() || matches!(self.timestamp, TimestampAction::Preserved(_))
    }
}

/// Generic interceptor driven by a list of [`InterceptRule`]s.
///
/// Holds only immutable configuration, so one instance can serve
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct Interceptor {
    rules: FxHashMap<ContentType, InterceptRule>,
    shortener: Shortener,
    limit: usize,
}

impl Default for Interceptor {
    fn default() -> Self {
        Self::new(InterceptRule::defaults(), Shortener::default(), DEFAULT_LIMIT)
    }
}

impl Interceptor {
    /// Build from rules. A later rule for the same content type replaces
    /// an earlier one.
    pub fn new(rules: Vec<InterceptRule>, shortener: Shortener, limit: usize) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| (rule.content_type, rule))
            .collect();
        Self {
            rules,
            shortener,
            limit,
        }
    }

    /// Character budget for long-text fields.
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn rule_for(&self, content_type: ContentType) -> Option<&InterceptRule> {
        self.rules.get(&content_type)
    }

    /// Intercept a create: only the long-text field may change.
    pub fn before_create(&self, content_type: ContentType, fields: &mut FieldMap) -> InterceptReport {
        let Some(rule) = self.rule_for(content_type) else {
            return InterceptReport::pass_through(content_type);
        };

        InterceptReport {
            content_type,
            intercepted: true,
            shortened: self.shorten_field(rule, fields),
            timestamp: TimestampAction::NotApplicable,
        }
    }

    /// Intercept an update: shorten the long-text field, then re-apply the
    /// stored publish timestamp if the write is metadata-only.
    pub fn before_update<S: ContentStore + ?Sized>(
        &self,
        op: &mut UpdateOperation,
        store: &S,
    ) -> InterceptReport {
        let Some(rule) = self.rule_for(op.content_type) else {
            return InterceptReport::pass_through(op.content_type);
        };

        let shortened = self.shorten_field(rule, &mut op.fields);

        let timestamp = if rule.is_metadata_only(&op.fields) {
            timestamp::preserve_published(rule, op, store)
        } else {
            TimestampAction::NotApplicable
        };

        InterceptReport {
            content_type: op.content_type,
            intercepted: true,
            shortened,
            timestamp,
        }
    }

    /// Shortened value for a long-text field, `None` if it already fits.
    pub fn propose(&self, text: &str) -> Option<String> {
        match self.shortener.shorten(text, self.limit) {
            std::borrow::Cow::Owned(s) => Some(s),
            std::borrow::Cow::Borrowed(_) => None,
        }
    }

    fn shorten_field(&self, rule: &InterceptRule, fields: &mut FieldMap) -> Option<Shortened> {
        let Some(Value::String(text)) = fields.get_mut(&rule.long_text_field) else {
            return None;
        };
        let shortened = self.propose(text)?;

        let report = Shortened {
            field: rule.long_text_field.clone(),
            before: char_len(text),
            after: char_len(&shortened),
        };
        crate::debug!("intercept"; "{}.{}: {} -> {} chars",
            rule.content_type, report.field, report.before, report.after);

        *text = shortened;
        Some(report)
    }
}
