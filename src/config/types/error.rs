//! Errors raised while loading `brewpress.toml`.
//!
//! Parsing problems stop immediately. Validation problems are gathered into
//! [`ConfigDiagnostics`] so one run reports every bad field.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed config")]
    Toml(#[from] toml::de::Error),

    /// An `extra_filler` phrase did not compile into the filler pattern.
    #[error("invalid seo.extra_filler phrase")]
    Filler(#[source] regex::Error),

    // Rendered in full by Display; not a source to avoid printing it twice
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Loading fails.
    Error,
    /// Printed, loading continues.
    Warning,
}

/// One finding about one config field.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub severity: Severity,
    pub field: FieldPath,
    pub message: String,
    /// Suggested fix.
    pub hint: Option<String>,
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n    {} {hint}", "help:".cyan().bold())?;
        }
        Ok(())
    }
}

/// Validation findings for a whole config file.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    items: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        &mut self,
        severity: Severity,
        field: FieldPath,
        message: String,
        hint: Option<String>,
    ) {
        self.items.push(ConfigDiagnostic {
            severity,
            field,
            message,
            hint,
        });
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(Severity::Error, field, message.into(), None);
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.push(Severity::Error, field, message.into(), Some(hint.into()));
    }

    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(Severity::Warning, field, message.into(), None);
    }

    fn with_severity(&self, severity: Severity) -> Vec<&ConfigDiagnostic> {
        self.items
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    pub fn errors(&self) -> Vec<&ConfigDiagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<&ConfigDiagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    /// Number of errors; warnings are not counted.
    pub fn len(&self) -> usize {
        self.errors().len()
    }

    /// True when there are no errors.
    pub fn is_empty(&self) -> bool {
        !self.has_errors()
    }

    pub fn print_warnings(&self) {
        for warning in self.warnings() {
            crate::log!("warning"; "{} {}", warning.field.as_str(), warning.message);
        }
    }

    /// `Err(self)` when any error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors();
        let count = match errors.len() {
            1 => "1 problem".to_string(),
            n => format!("{n} problems"),
        };
        write!(f, "{} ({count})", "invalid brewpress.toml".red().bold())?;
        for error in errors {
            write!(f, "\n  {} {error}", "-".red())?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::Io(
            PathBuf::from("brewpress.toml"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("brewpress.toml"));

        let regex_err = regex::Regex::new("(").unwrap_err();
        let err = ConfigError::Filler(regex_err);
        assert!(err.to_string().contains("extra_filler"));
    }

    #[test]
    fn test_errors_and_warnings_split() {
        let mut diag = ConfigDiagnostics::new();
        assert!(diag.is_empty());

        diag.error(FieldPath::new("seo.description_limit"), "too small");
        diag.warn(FieldPath::new("seo.extra_filler[0]"), "empty phrase");
        diag.error_with_hint(
            FieldPath::new("intercept[0].long_text_field"),
            "must not be empty",
            "use \"meta_description\"",
        );

        assert_eq!(diag.len(), 2);
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(
            diag.errors()[1].hint.as_deref(),
            Some("use \"meta_description\"")
        );
    }

    #[test]
    fn test_display_lists_errors_only() {
        let mut diag = ConfigDiagnostics::new();
        diag.error(FieldPath::new("store.path"), "must not be empty");
        diag.warn(FieldPath::new("intercept[0].metadata_fields"), "empty");

        let text = diag.into_result().unwrap_err().to_string();
        assert!(text.contains("1 problem"));
        assert!(text.contains("store.path"));
        assert!(!text.contains("metadata_fields"));
    }

    #[test]
    fn test_warnings_alone_pass() {
        let mut diag = ConfigDiagnostics::new();
        diag.warn(FieldPath::new("seo.extra_filler[0]"), "empty phrase");
        assert!(diag.into_result().is_ok());
        assert!(ConfigDiagnostics::new().into_result().is_ok());
    }
}
