//! Command-line interface definitions.

use brewpress::content::{ContentType, RecordId};
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Brewpress content toolkit: SEO description shortening for a coffee CMS
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: brewpress.toml)
    #[arg(short = 'C', long, global = true, default_value = "brewpress.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print interceptor decisions and other debug output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Shorten a description to the configured budget
    #[command(visible_alias = "s")]
    Shorten {
        /// Text to shorten. Reads stdin when omitted or `-`
        text: Option<String>,

        /// Character budget (default: seo.description_limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List records whose long-text field exceeds the budget
    #[command(visible_alias = "a")]
    Audit {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Exit with an error if any record is over budget
        #[arg(long)]
        strict: bool,

        /// Print findings as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Rewrite over-long fields through the write pipeline
    #[command(visible_alias = "o")]
    Optimize {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Show what would change without saving
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Create or update a single record through the write pipeline
    #[command(visible_alias = "w")]
    Write {
        /// Content type of the record (article, category, product, recipe, guide)
        content_type: ContentType,

        /// Record id to update. Creates a new record when omitted
        #[arg(long)]
        id: Option<RecordId>,

        /// Field values as a JSON object
        #[arg(short, long)]
        data: String,

        #[command(flatten)]
        store: StoreArgs,

        /// Run the interceptor and print the result without saving
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
}

/// Content types and store selection for bulk commands.
#[derive(clap::Args, Debug, Clone)]
pub struct ScopeArgs {
    /// Content types to process, comma separated (default: all with a rule)
    #[arg(short = 't', long = "type", value_delimiter = ',')]
    pub types: Vec<ContentType>,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Store override shared by commands that touch the content export.
#[derive(clap::Args, Debug, Clone)]
pub struct StoreArgs {
    /// Content export path (default: store.path from config)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub store: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_audit_types() {
        let cli = Cli::parse_from(["brewpress", "audit", "--type", "recipe,guides", "--strict"]);
        let Commands::Audit { scope, strict, json } = cli.command else {
            panic!("expected audit");
        };
        assert_eq!(scope.types, vec![ContentType::Recipe, ContentType::Guide]);
        assert!(strict);
        assert!(!json);
    }

    #[test]
    fn test_parse_write_update() {
        let cli = Cli::parse_from([
            "brewpress",
            "-v",
            "write",
            "article",
            "--id",
            "12",
            "--data",
            r#"{"meta_title":"Pour-over"}"#,
        ]);
        assert!(cli.verbose);
        let Commands::Write { content_type, id, .. } = cli.command else {
            panic!("expected write");
        };
        assert_eq!(content_type, ContentType::Article);
        assert_eq!(id, Some(RecordId::Numeric(12)));
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(Cli::try_parse_from(["brewpress", "audit", "--type", "podcast"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["brewpress", "shorten", "-C", "site/brewpress.toml", "hi"]);
        assert_eq!(cli.config, PathBuf::from("site/brewpress.toml"));
    }
}
