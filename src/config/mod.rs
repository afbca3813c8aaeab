//! Configuration management for `brewpress.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── intercept  # [[intercept]]
//! │   ├── seo        # [seo]
//! │   └── store      # [store]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # BrewConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section          | Purpose                                       |
//! |------------------|-----------------------------------------------|
//! | `[seo]`          | Description budget and extra filler phrases   |
//! | `[store]`        | JSON content export path                      |
//! | `[[intercept]]`  | Content types and fields the hooks act on     |
//!
//! Every section is optional; a missing config file means all defaults.

pub mod section;
pub mod types;

pub use section::{SeoSectionConfig, StoreSectionConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath, Severity};

use crate::intercept::{InterceptRule, Interceptor};
use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "brewpress.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing brewpress.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrewConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory relative paths resolve against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Description shortening settings
    #[serde(default)]
    pub seo: SeoSectionConfig,

    /// Content store settings
    #[serde(default)]
    pub store: StoreSectionConfig,

    /// Interception rules, one per content type
    #[serde(default)]
    pub intercept: Vec<InterceptRule>,
}

impl BrewConfig {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// Relative paths inside the file resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .context("Failed to get current working directory")?
                .join(path)
        };

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            crate::debug!("config"; "{} not found, using defaults", config_path.display());
            Self::default()
        };

        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.config_path = config_path;
        // Validate raw values; normalizing turns an empty path into `root`
        config.validate()?;
        config.finalize(&root);

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Resolve paths against `root`.
    fn finalize(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        self.store.normalize(root);
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the whole configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.seo.validate(&mut diag);
        self.store.validate(&mut diag);
        section::intercept::validate_rules(&self.intercept, &mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    // ========================================================================
    // runtime views
    // ========================================================================

    /// Interception rules in effect.
    pub fn rules(&self) -> Vec<InterceptRule> {
        section::intercept::effective_rules(&self.intercept)
    }

    /// Build the interceptor described by this configuration.
    pub fn interceptor(&self) -> Result<Interceptor> {
        let shortener = self.seo.shortener().map_err(ConfigError::Filler)?;
        Ok(Interceptor::new(
            self.rules(),
            shortener,
            self.seo.description_limit,
        ))
    }
}

// ============================================================================
// tests
// ============================================================================
