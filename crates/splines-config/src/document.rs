//! Node arrays read from generic key/value documents.
//!
//! A document is any JSON object (TOML tables are converted first) with two
//! fields, `x` and `y`, each an array of real or integer numbers. Other
//! fields are ignored.
//!
//! ```rust
//! use serde_json::json;
//! use splines_config::setup;
//! use splines_math::spline::{ConstantSpline, Spline};
//!
//! let mut spline = ConstantSpline::new("steps");
//! setup(&mut spline, &json!({ "x": [0, 1, 2], "y": [1.5, 2.5, 0] })).unwrap();
//!
//! assert_eq!(spline.value(1.2).unwrap(), 2.5);
//! ```

use log::debug;
use serde_json::Value;

use splines_math::spline::Spline;

use crate::error::{ConfigError, ConfigResult};

/// Builds `spline` from the `x` and `y` fields of `doc`.
///
/// # Errors
///
/// - [`ConfigError::MissingField`] if `x` or `y` is absent.
/// - [`ConfigError::InvalidFieldType`] if either is not an array of numbers.
/// - [`ConfigError::Spline`] if the spline rejects the nodes.
pub fn setup<S: Spline + ?Sized>(spline: &mut S, doc: &Value) -> ConfigResult<()> {
    let x = real_vector(doc, spline.name(), "x")?;
    let y = real_vector(doc, spline.name(), "y")?;

    debug!(
        "spline '{}': setup from document with {} abscissas, {} ordinates",
        spline.name(),
        x.len(),
        y.len()
    );
    spline.build(&x, &y)?;
    Ok(())
}

/// Parses `text` as JSON and calls [`setup`].
pub fn setup_json_str<S: Spline + ?Sized>(spline: &mut S, text: &str) -> ConfigResult<()> {
    let doc: Value = serde_json::from_str(text)?;
    setup(spline, &doc)
}

/// Parses `text` as a TOML table and calls [`setup`].
pub fn setup_toml_str<S: Spline + ?Sized>(spline: &mut S, text: &str) -> ConfigResult<()> {
    let table: toml::Table = toml::from_str(text)?;
    let doc = serde_json::to_value(table)?;
    setup(spline, &doc)
}

/// Document type name used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn real_vector(doc: &Value, spline: &str, field: &'static str) -> ConfigResult<Vec<f64>> {
    let value = doc.get(field).ok_or_else(|| ConfigError::MissingField {
        spline: spline.to_string(),
        field,
    })?;

    let invalid = |found: String| ConfigError::InvalidFieldType {
        spline: spline.to_string(),
        field,
        found,
    };

    let items = value
        .as_array()
        .ok_or_else(|| invalid(type_name(value).to_string()))?;

    items
        .iter()
        .map(|item| {
            item.as_f64()
                .ok_or_else(|| invalid(format!("array<{}>", type_name(item))))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use splines_math::spline::{ConstantSpline, LinearSpline, SplineState};

    #[test]
    fn test_setup_reals_and_integers() {
        let mut spline = LinearSpline::new("mixed");
        setup(&mut spline, &json!({ "x": [0, 1.5, 3], "y": [1, 2, 4] })).unwrap();

        assert_eq!(spline.x_nodes(), &[0.0, 1.5, 3.0]);
        assert_eq!(spline.value(3.0).unwrap(), 4.0);
    }

    #[test]
    fn test_missing_x() {
        let mut spline = ConstantSpline::new("nox");
        let err = setup(&mut spline, &json!({ "y": [1, 2] })).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingField { ref spline, field: "x" } if spline == "nox"
        ));
        assert_eq!(err.to_string(), "[nox] missing `x` field");
        assert_eq!(spline.state(), SplineState::Empty);
    }

    #[test]
    fn test_missing_y() {
        let mut spline = ConstantSpline::new("noy");
        let err = setup(&mut spline, &json!({ "x": [1, 2] })).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "y", .. }));
    }

    #[test]
    fn test_wrong_field_types() {
        let mut spline = ConstantSpline::new("typed");

        let err = setup(&mut spline, &json!({ "x": "0,1,2", "y": [1, 2] })).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidFieldType { field: "x", ref found, .. } if found == "string"
        ));

        let err = setup(&mut spline, &json!({ "x": [0, 1], "y": [1, "2"] })).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidFieldType { field: "y", ref found, .. } if found == "array<string>"
        ));
    }

    #[test]
    fn test_spline_rejection_is_reported() {
        let mut spline = ConstantSpline::new("decreasing");
        let err = setup(&mut spline, &json!({ "x": [2, 1, 0], "y": [1, 2, 3] })).unwrap_err();
        assert!(matches!(err, ConfigError::Spline(_)));
    }

    #[test]
    fn test_setup_from_strings() {
        let mut spline = ConstantSpline::new("json");
        setup_json_str(&mut spline, r#"{ "x": [0, 1, 2], "y": [3, 4, 5] }"#).unwrap();
        assert_eq!(spline.value(0.5).unwrap(), 3.0);

        let mut spline = ConstantSpline::new("toml");
        setup_toml_str(&mut spline, "x = [0, 1, 2]\ny = [3.0, 4.0, 5.0]\n").unwrap();
        assert_eq!(spline.value(1.5).unwrap(), 4.0);

        assert!(matches!(
            setup_json_str(&mut spline, "{ not json"),
            Err(ConfigError::Deserialization(_))
        ));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!({})), "object");
        assert_eq!(type_name(&json!([1])), "array");
    }
}
