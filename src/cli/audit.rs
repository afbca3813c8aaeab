//! `audit` command: find records whose long-text field is over budget.
//!
//! Records are checked in parallel; nothing is written.

use anyhow::Result;
use brewpress::config::BrewConfig;
use brewpress::content::{ContentType, RecordId};
use brewpress::intercept::Interceptor;
use brewpress::log;
use brewpress::store::ContentStore;
use brewpress::utils::text::{char_len, plural_count};
use owo_colors::OwoColorize;
use rayon::prelude::*;
use serde::Serialize;

use super::{ScopeArgs, open_store, scoped_types};

/// One record whose long-text field exceeds the budget.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub content_type: ContentType,
    pub id: RecordId,
    pub field: String,
    /// Current length in characters.
    pub current: usize,
    /// Length after shortening.
    pub proposed: usize,
    pub proposal: String,
}

/// Result of scanning a store.
#[derive(Debug, Default)]
pub struct Audit {
    /// Records looked at, over budget or not.
    pub checked: usize,
    pub findings: Vec<Finding>,
}

/// Scan `types` in `store` for over-budget long-text fields.
///
/// Fields that are absent or not strings are ignored.
pub fn collect_findings<S: ContentStore + ?Sized>(
    store: &S,
    interceptor: &Interceptor,
    types: &[ContentType],
) -> Result<Audit> {
    let mut audit = Audit::default();

    for &content_type in types {
        let Some(rule) = interceptor.rule_for(content_type) else {
            continue;
        };
        let records = store.list(content_type)?;
        audit.checked += records.len();

        let findings: Vec<Finding> = records
            .par_iter()
            .filter_map(|record| {
                let text = record.get_str(&rule.long_text_field)?;
                let proposal = interceptor.propose(text)?;
                Some(Finding {
                    content_type,
                    id: record.id.clone(),
                    field: rule.long_text_field.clone(),
                    current: char_len(text),
                    proposed: char_len(&proposal),
                    proposal,
                })
            })
            .collect();
        audit.findings.extend(findings);
    }

    Ok(audit)
}

/// Execute audit command
pub fn run_audit(scope: &ScopeArgs, strict: bool, json: bool, config: &BrewConfig) -> Result<()> {
    let store = open_store(config, &scope.store, false)?;
    let interceptor = config.interceptor()?;
    let types = scoped_types(&interceptor, &scope.types);

    let audit = collect_findings(&store, &interceptor, &types)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&audit.findings)?);
    } else {
        print_findings(&audit.findings);
    }

    log!("audit"; "checked {}, {} over {} characters",
        plural_count(audit.checked, "record"), audit.findings.len(), interceptor.limit());

    if strict && !audit.findings.is_empty() {
        anyhow::bail!(
            "found {} over budget",
            plural_count(audit.findings.len(), "description")
        );
    }

    Ok(())
}

fn print_findings(findings: &[Finding]) {
    for finding in findings {
        println!(
            "{} {} {}: {} -> {} chars",
            finding.content_type.cyan(),
            finding.id,
            finding.field.dimmed(),
            finding.current.red(),
            finding.proposed.green(),
        );
        println!("  {}", finding.proposal);
    }
}
