//! `[store]` section configuration.
//!
//! ```toml
//! [store]
//! path = "content.json"   # JSON content export, relative to the config file
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSectionConfig {
    /// Path to the JSON content export.
    pub path: PathBuf,
}

impl Default for StoreSectionConfig {
    fn default() -> Self {
        Self {
            path: "content.json".into(),
        }
    }
}

impl StoreSectionConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.path.as_os_str().is_empty() {
            diag.error_with_hint(
                FieldPath::new("store.path"),
                "must not be empty",
                "e.g. path = \"content.json\"",
            );
        }
    }

    /// Expand `~` and resolve relative paths against `root`.
    pub fn normalize(&mut self, root: &Path) {
        let raw = self.path.to_string_lossy();
        let expanded = PathBuf::from(shellexpand::tilde(&raw).into_owned());
        self.path = if expanded.is_relative() {
            root.join(expanded)
        } else {
            expanded
        };
    }
}
