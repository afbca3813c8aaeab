//! Brewpress - SEO description tooling for a coffee-content CMS.

mod cli;

use anyhow::Result;
use brewpress::config::BrewConfig;
use brewpress::logger;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    let config = BrewConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Shorten { text, limit } => {
            cli::shorten::run_shorten(text.as_deref(), *limit, &config)
        }
        Commands::Audit {
            scope,
            strict,
            json,
        } => cli::audit::run_audit(scope, *strict, *json, &config),
        Commands::Optimize { scope, dry_run } => {
            cli::optimize::run_optimize(scope, *dry_run, &config)
        }
        Commands::Write {
            content_type,
            id,
            data,
            store,
            dry_run,
        } => cli::write::run_write(*content_type, id.as_ref(), data, store, *dry_run, &config),
    }
}
