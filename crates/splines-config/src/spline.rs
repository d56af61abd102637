//! Spline configuration types.
//!
//! This module defines a serializable description of a spline: its kind,
//! extrapolation policy, and node arrays.

use log::info;
use serde::{Deserialize, Serialize};

use splines_math::spline::{ExtrapolationPolicy, Spline, SplineKind};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Configuration for one spline.
///
/// # Example
///
/// ```rust
/// use splines_config::SplineConfig;
///
/// let config = SplineConfig::from_toml_str(r#"
///     name = "titanium"
///     kind = "linear"
///     x = [595, 635, 695, 795]
///     y = [0.644, 0.652, 0.644, 0.694]
/// "#).unwrap();
///
/// let spline = config.build().unwrap();
/// assert_eq!(spline.num_points(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineConfig {
    /// Spline name, used in diagnostics.
    pub name: String,

    /// Spline kind.
    #[serde(default)]
    pub kind: SplineKind,

    /// Behaviour outside the node range.
    #[serde(default)]
    pub extrapolation: ExtrapolationPolicy,

    /// Node abscissas.
    pub x: Vec<f64>,

    /// Node ordinates.
    pub y: Vec<f64>,
}

impl SplineConfig {
    /// Creates a new spline configuration.
    pub fn new(name: impl Into<String>, kind: SplineKind, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            kind,
            extrapolation: ExtrapolationPolicy::default(),
            x,
            y,
        }
    }

    /// Sets the extrapolation policy.
    #[must_use]
    pub fn with_extrapolation(mut self, policy: ExtrapolationPolicy) -> Self {
        self.extrapolation = policy;
        self
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses a configuration from TOML.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Serializes the configuration to pretty JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the configuration and builds the spline it describes.
    pub fn build(&self) -> ConfigResult<Box<dyn Spline>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Invalid {
                spline: self.name.clone(),
                errors,
            });
        }

        let mut spline = self.kind.create(self.name.clone());
        spline.set_extrapolation(self.extrapolation);
        spline.build(&self.x, &self.y)?;

        info!(
            "built {} spline '{}' with {} nodes",
            self.kind,
            self.name,
            spline.num_points()
        );
        Ok(spline)
    }

    /// Number of ordinates the kind accepts for `x.len()` abscissas.
    fn accepted_y_lengths(&self) -> (usize, usize) {
        let n = self.x.len();
        match self.kind {
            SplineKind::Constant => (n.saturating_sub(1), n + 1),
            SplineKind::Linear => (n, n),
        }
    }
}

impl Validate for SplineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "non_empty", "must not be empty"));
        }

        if self.x.len() < 2 {
            errors.push(ValidationError::new(
                "x",
                "min_nodes",
                format!("needs at least 2 nodes, got {}", self.x.len()),
            ));
        }

        if self.x.iter().any(|v| !v.is_finite()) {
            errors.push(ValidationError::new("x", "finite_nodes", "must be finite"));
        } else if self.x.windows(2).any(|w| w[1] < w[0]) {
            errors.push(ValidationError::new(
                "x",
                "monotone_nodes",
                "must be non-decreasing",
            ));
        }

        let (min_y, max_y) = self.accepted_y_lengths();
        if self.y.len() < min_y || self.y.len() > max_y {
            errors.push(ValidationError::new(
                "y",
                "ordinate_count",
                format!(
                    "takes {}..={} ordinates for {} {} nodes, got {}",
                    min_y,
                    max_y,
                    self.x.len(),
                    self.kind.as_str(),
                    self.y.len()
                ),
            ));
        }

        errors
    }
}
