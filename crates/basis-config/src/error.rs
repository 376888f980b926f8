//! Errors raised while loading and validating configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for loading and checking configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure to load or accept a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Cannot read configuration file {path}: {source}")]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Exactly one setting is out of range.
    #[error("Invalid setting {field}: {message}")]
    Validation {
        /// Dotted path of the setting.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// Several settings are out of range; all of them are reported.
    #[error("{} invalid settings: {}", .0.len(), join(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// TOML rendering failed.
    #[error("Cannot render configuration: {0}")]
    Serialization(#[from] toml::ser::Error),

    /// The file is not valid TOML for this schema.
    #[error("Malformed configuration: {0}")]
    Deserialization(#[from] toml::de::Error),
}

fn join(errors: &[ValidationError]) -> String {
    let parts: Vec<String> = errors.iter().map(ToString::to_string).collect();
    parts.join("; ")
}

/// One rejected setting, addressed by its dotted TOML path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path such as `stress.shocks_bps`.
    pub field: String,
    /// What is wrong with the value.
    pub message: String,
    /// Short rule tag, when the check has one.
    pub rule: Option<String>,
}

impl ValidationError {
    /// An untagged violation.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Same as [`ValidationError::new`], tagged with the violated rule.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            rule: Some(rule.into()),
            ..Self::new(field, message)
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        match &self.rule {
            Some(rule) => write!(f, " (rule: {rule})"),
            None => Ok(()),
        }
    }
}

/// Range checks over a parsed configuration.
///
/// Implementors report every violation at once rather than stopping at the
/// first one, so a user can fix a file in a single pass.
pub trait Validate {
    /// All violations; empty when the value is acceptable.
    fn validate(&self) -> Vec<ValidationError>;

    /// True when [`Validate::validate`] finds nothing.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Folds [`Validate::validate`] into a single error.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        if errors.len() > 1 {
            return Err(ConfigError::MultipleValidationErrors(errors));
        }
        match errors.pop() {
            None => Ok(()),
            Some(ValidationError { field, message, .. }) => {
                Err(ConfigError::Validation { field, message })
            }
        }
    }
}
