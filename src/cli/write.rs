//! `write` command: send one create or update through the write pipeline.
//!
//! Prints the outgoing record and the interceptor report as JSON.

use anyhow::{Context, Result};
use brewpress::config::BrewConfig;
use brewpress::content::{ContentType, FieldMap, RecordId, UpdateOperation};
use brewpress::intercept::{InterceptReport, WritePipeline};
use brewpress::log;
use brewpress::store::{ContentStore, StoreError};
use serde::Serialize;

use super::{StoreArgs, open_store};

/// What the command prints.
#[derive(Debug, Serialize)]
struct WriteOutput<'a> {
    content_type: ContentType,
    /// `None` for a dry-run create, which has no id yet.
    id: Option<&'a RecordId>,
    fields: &'a FieldMap,
    report: &'a InterceptReport,
    saved: bool,
}

/// Parse `--data` into a field map.
fn parse_fields(data: &str) -> Result<FieldMap> {
    serde_json::from_str(data).context("--data must be a JSON object")
}

/// Execute write command
pub fn run_write(
    content_type: ContentType,
    id: Option<&RecordId>,
    data: &str,
    store: &StoreArgs,
    dry_run: bool,
    config: &BrewConfig,
) -> Result<()> {
    let mut fields = parse_fields(data)?;
    // Creating may start a fresh export; updating needs an existing record.
    let mut store = open_store(config, store, id.is_none())?;
    let interceptor = config.interceptor()?;
    let id = id
        .map(|id| resolve_id(&store, content_type, id))
        .transpose()?;

    if dry_run {
        let (id, fields, report) = match &id {
            None => {
                let report = interceptor.before_create(content_type, &mut fields);
                (None, fields, report)
            }
            Some(id) => {
                let mut op = UpdateOperation::new(content_type, id.clone(), fields);
                let report = interceptor.before_update(&mut op, &store);
                (Some(id), op.fields, report)
            }
        };
        return print_output(&WriteOutput {
            content_type,
            id,
            fields: &fields,
            report: &report,
            saved: false,
        });
    }

    let mut pipeline = WritePipeline::new(store, interceptor);
    let (record, report) = match id {
        None => pipeline.create(content_type, fields)?,
        Some(id) => pipeline.update(content_type, id, fields)?,
    };

    store = pipeline.into_store();
    store.save_if_dirty()?;
    log!("write"; "{} `{}` saved to {}", record.content_type, record.id, store.path().display());

    print_output(&WriteOutput {
        content_type: record.content_type,
        id: Some(&record.id),
        fields: &record.fields,
        report: &report,
        saved: true,
    })
}

/// Match `id` to the spelling stored in the export, so `--id 42` also finds
/// a record exported as `"id": "42"`. Unknown ids come back unchanged.
fn resolve_id<S: ContentStore>(
    store: &S,
    content_type: ContentType,
    id: &RecordId,
) -> Result<RecordId, StoreError> {
    if store.find_one(content_type, id)?.is_some() {
        return Ok(id.clone());
    }
    if let Some(alternate) = id.alternate()
        && store.find_one(content_type, &alternate)?.is_some()
    {
        return Ok(alternate);
    }
    Ok(id.clone())
}

fn print_output(output: &WriteOutput<'_>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
