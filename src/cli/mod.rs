//! Command-line interface module.

mod args;
pub mod audit;
pub mod optimize;
pub mod shorten;
pub mod write;

pub use args::{Cli, Commands, ScopeArgs, StoreArgs};

use anyhow::{Context, Result};
use brewpress::config::BrewConfig;
use brewpress::content::ContentType;
use brewpress::intercept::Interceptor;
use brewpress::store::JsonStore;

/// Open the content export selected by `--store` or the config.
///
/// With `create` set, a missing export starts empty instead of failing.
fn open_store(config: &BrewConfig, args: &StoreArgs, create: bool) -> Result<JsonStore> {
    let path = args.store.clone().unwrap_or_else(|| config.store.path.clone());
    let store = if create {
        JsonStore::open_or_new(&path)
    } else {
        JsonStore::open(&path)
    };
    store.with_context(|| format!("failed to open content export {}", path.display()))
}

/// Content types to process: the requested ones, or every type with a rule.
///
/// Requested types without a rule are dropped with a warning.
fn scoped_types(interceptor: &Interceptor, requested: &[ContentType]) -> Vec<ContentType> {
    if requested.is_empty() {
        return ContentType::ALL
            .into_iter()
            .filter(|ct| interceptor.rule_for(*ct).is_some())
            .collect();
    }

    let mut types = Vec::with_capacity(requested.len());
    for &ct in requested {
        if interceptor.rule_for(ct).is_none() {
            brewpress::log!("warning"; "no intercept rule for `{}`, skipping", ct);
        } else if !types.contains(&ct) {
            types.push(ct);
        }
    }
    types
}
