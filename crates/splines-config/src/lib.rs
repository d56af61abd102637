//! Splines Configuration Layer
//!
//! This crate builds splines from structured documents. It supports
//!
//! - **Document setup**: read `x` and `y` node arrays from any JSON object or
//!   TOML table and build an existing spline ([`setup`])
//! - **Spline configuration**: a serializable [`SplineConfig`] that names the
//!   kind, extrapolation policy and nodes, validated before building
//!
//! # Example
//!
//! ```rust
//! use splines_config::SplineConfig;
//!
//! let config = SplineConfig::from_json_str(r#"{
//!     "name": "akima",
//!     "kind": "constant",
//!     "x": [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
//!     "y": [10, 10, 10, 10, 10, 10, 10.5, 15, 50, 60, 85]
//! }"#).unwrap();
//!
//! let spline = config.build().unwrap();
//! assert_eq!(spline.value(6.5).unwrap(), 10.5);
//! assert_eq!(spline.value(10.5).unwrap(), 60.0);
//! ```
//!
//! # Errors
//!
//! Missing or mistyped fields are reported as [`ConfigError`] values naming
//! the spline and the offending field; they never panic.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod document;
mod error;
mod spline;

// Re-export core types
pub use document::{setup, setup_json_str, setup_toml_str, type_name};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use spline::SplineConfig;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::document::setup;
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::spline::SplineConfig;
}
