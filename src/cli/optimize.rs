//! `optimize` command: rewrite over-budget fields through the write pipeline.
//!
//! Proposals are computed in parallel by the audit scan, then applied one at
//! a time as single-field updates. Each update is metadata-only under the
//! default rules, so published records keep their timestamp.

use anyhow::Result;
use brewpress::config::BrewConfig;
use brewpress::content::{ContentType, FieldMap};
use brewpress::intercept::{TimestampAction, WritePipeline};
use brewpress::logger::ProgressLine;
use brewpress::store::ContentStore;
use brewpress::utils::text::plural_count;
use brewpress::{debug, log};
use serde_json::Value;

use super::audit::{Finding, collect_findings};
use super::{ScopeArgs, open_store, scoped_types};

/// Counts from applying a batch of findings.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Applied {
    pub updated: usize,
    /// Updates that had the stored publish timestamp re-applied.
    pub preserved: usize,
    pub failed: usize,
}

/// Apply each finding's proposal as an update through `pipeline`.
///
/// A failed update is logged and counted; the rest still run.
pub fn apply_findings<S: ContentStore>(
    pipeline: &mut WritePipeline<S>,
    findings: &[Finding],
    progress: Option<&ProgressLine>,
) -> Applied {
    let mut applied = Applied::default();

    for finding in findings {
        let mut fields = FieldMap::new();
        fields.insert(finding.field.clone(), Value::String(finding.proposal.clone()));

        match pipeline.update(finding.content_type, finding.id.clone(), fields) {
            Ok((_, report)) => {
                applied.updated += 1;
                if let TimestampAction::Preserved(value) = &report.timestamp {
                    applied.preserved += 1;
                    debug!("optimize"; "{} `{}`: timestamp {} kept",
                        finding.content_type, finding.id, value);
                }
            }
            Err(err) => {
                applied.failed += 1;
                log!("error"; "{} `{}`: {}", finding.content_type, finding.id, err);
            }
        }

        if let Some(progress) = progress {
            progress.inc(finding.content_type.name());
        }
    }

    applied
}

/// Execute optimize command
pub fn run_optimize(scope: &ScopeArgs, dry_run: bool, config: &BrewConfig) -> Result<()> {
    let store = open_store(config, &scope.store, false)?;
    let interceptor = config.interceptor()?;
    let types = scoped_types(&interceptor, &scope.types);

    let audit = collect_findings(&store, &interceptor, &types)?;
    if audit.findings.is_empty() {
        log!("optimize"; "all {} within {} characters",
            plural_count(audit.checked, "record"), interceptor.limit());
        return Ok(());
    }

    if dry_run {
        for finding in &audit.findings {
            println!(
                "{} {}: {} -> {} chars",
                finding.content_type, finding.id, finding.current, finding.proposed
            );
        }
        log!("optimize"; "dry run, {} would change",
            plural_count(audit.findings.len(), "record"));
        return Ok(());
    }

    let counts = count_by_type(&audit.findings);
    let progress = ProgressLine::new("optimize", &counts);
    let mut pipeline = WritePipeline::new(store, interceptor);
    let applied = apply_findings(&mut pipeline, &audit.findings, Some(&progress));
    progress.finish();

    let mut store = pipeline.into_store();
    if store.save_if_dirty()? {
        log!("optimize"; "shortened {} ({} with timestamp kept), saved {}",
            plural_count(applied.updated, "description"), applied.preserved, store.path().display());
    }

    if applied.failed > 0 {
        anyhow::bail!("{} failed", plural_count(applied.failed, "update"));
    }
    Ok(())
}

/// Findings per content type, in declaration order.
fn count_by_type(findings: &[Finding]) -> Vec<(&'static str, usize)> {
    ContentType::ALL
        .into_iter()
        .map(|ct| {
            let count = findings.iter().filter(|f| f.content_type == ct).count();
            (ct.name(), count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::StoreArgs;
    use brewpress::config::CONFIG_FILE;
    use brewpress::content::RecordId;
    use brewpress::intercept::Interceptor;
    use brewpress::store::{JsonStore, MemoryStore};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const PUBLISHED: &str = "2024-03-01T08:00:00Z";

    fn long_text() -> String {
        "This comprehensive recipe walks through every step of a washed Ethiopian pour-over. \
         We cover grind size, bloom time, pour cadence and the water temperature that keeps \
         the florals bright. Finish with tasting notes and troubleshooting."
            .to_string()
    }

    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        for published in [json!(PUBLISHED), json!(null)] {
            store
                .create(
                    ContentType::Recipe,
                    json!({
                        "title": "Ethiopian V60",
                        "meta_description": long_text(),
                        "publishedAt": published,
                    })
                    .as_object()
                    .cloned()
                    .unwrap(),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn test_apply_preserves_timestamp() {
        let interceptor = Interceptor::default();
        let store = seeded_store();
        let audit = collect_findings(&store, &interceptor, &[ContentType::Recipe]).unwrap();
        assert_eq!(audit.findings.len(), 2);

        let mut pipeline = WritePipeline::new(store, interceptor);
        let applied = apply_findings(&mut pipeline, &audit.findings, None);
        assert_eq!(
            applied,
            Applied {
                updated: 2,
                preserved: 1,
                failed: 0
            }
        );

        let store = pipeline.into_store();
        let record = store
            .find_one(ContentType::Recipe, &RecordId::Numeric(1))
            .unwrap()
            .unwrap();
        assert_eq!(record.fields["publishedAt"], PUBLISHED);
        assert_eq!(record.get_str("title"), Some("Ethiopian V60"));
        assert!(record.get_str("meta_description").unwrap().chars().count() <= 160);
    }

    #[test]
    fn test_apply_counts_failures() {
        let interceptor = Interceptor::default();
        let audit = collect_findings(&seeded_store(), &interceptor, &[ContentType::Recipe]).unwrap();

        // Findings from one store applied to an empty one: every update misses.
        let mut pipeline = WritePipeline::new(MemoryStore::new(), interceptor);
        let applied = apply_findings(&mut pipeline, &audit.findings, None);
        assert_eq!(applied.updated, 0);
        assert_eq!(applied.failed, 2);
    }

    #[test]
    fn test_count_by_type() {
        let finding = |content_type| Finding {
            content_type,
            id: RecordId::Numeric(1),
            field: "meta_description".into(),
            current: 200,
            proposed: 150,
            proposal: String::new(),
        };
        let counts = count_by_type(&[
            finding(ContentType::Guide),
            finding(ContentType::Guide),
            finding(ContentType::Article),
        ]);
        assert_eq!(counts[0], ("article", 1));
        assert_eq!(counts[4], ("guide", 2));
        assert_eq!(counts[1], ("category", 0));
    }

    #[test]
    fn test_run_optimize_saves_export() {
        let dir = TempDir::new().unwrap();
        let export = dir.path().join("content.json");
        fs::write(
            &export,
            json!({
                "recipe": [
                    { "id": 1, "meta_description": long_text(), "publishedAt": PUBLISHED }
                ]
            })
            .to_string(),
        )
        .unwrap();

        let config = BrewConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        let scope = ScopeArgs {
            types: vec![],
            store: StoreArgs { store: None },
        };
        run_optimize(&scope, false, &config).unwrap();

        let store = JsonStore::open(&export).unwrap();
        let record = store
            .find_one(ContentType::Recipe, &RecordId::Numeric(1))
            .unwrap()
            .unwrap();
        assert_eq!(record.fields["publishedAt"], PUBLISHED);
        assert!(record.get_str("meta_description").unwrap().chars().count() <= 160);
    }

    #[test]
    fn test_run_optimize_dry_run_leaves_export() {
        let dir = TempDir::new().unwrap();
        let export = dir.path().join("content.json");
        let content = json!({ "guide": [ { "id": 7, "meta_description": long_text() } ] })
            .to_string();
        fs::write(&export, &content).unwrap();

        let config = BrewConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        let scope = ScopeArgs {
            types: vec![ContentType::Guide],
            store: StoreArgs { store: None },
        };
        run_optimize(&scope, true, &config).unwrap();
        assert_eq!(fs::read_to_string(&export).unwrap(), content);
    }
}
