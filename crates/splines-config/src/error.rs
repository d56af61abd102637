//! Configuration error types.

use thiserror::Error;

use splines_math::SplineError;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field is absent from the document.
    #[error("[{spline}] missing `{field}` field")]
    MissingField {
        /// Name of the spline being configured.
        spline: String,
        /// The absent field.
        field: &'static str,
    },

    /// A field has the wrong type.
    #[error("[{spline}] field `{field}` expected to be an array of numbers, found `{found}`")]
    InvalidFieldType {
        /// Name of the spline being configured.
        spline: String,
        /// The offending field.
        field: &'static str,
        /// Type found in the document.
        found: String,
    },

    /// The configuration breaks one or more node rules.
    #[error("[{spline}] invalid configuration: {}", list(.errors))]
    Invalid {
        /// Name of the spline being configured.
        spline: String,
        /// Every rule the configuration breaks.
        errors: Vec<ValidationError>,
    },

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The spline rejected the configured nodes.
    #[error("Spline error: {0}")]
    Spline(#[from] SplineError),
}

fn list(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// One broken configuration rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Offending field.
    pub field: &'static str,
    /// Short rule identifier, e.g. `monotone_nodes`.
    pub rule: &'static str,
    /// Human-readable detail.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(field: &'static str, rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            rule,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` {} ({})", self.field, self.message, self.rule)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}

/// Configurations that can be checked before building.
pub trait Validate {
    /// Every rule the configuration breaks; empty if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
