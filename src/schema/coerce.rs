//! Coercion primitives for untrusted mesh JSON.
//!
//! Every primitive takes the raw value (`None` when the member is absent), the caller's default,
//! and the path of the value for error messages. The first violation is returned; nothing is
//! clamped or partially defaulted.

use crate::foundation::core::Rgb;
use crate::foundation::error::{MeshError, MeshResult};
use crate::mesh::model::Interpolation;
use crate::schema::path::SchemaPath;
use serde_json::{Map, Value};

/// Members allowed on a color object.
pub const COLOR_KEYS: &[&str] = &["r", "g", "b"];

/// Coerce a number, substituting `default` when absent and enforcing `min <= n <= max`.
///
/// Literals that overflow `f64` become `±inf`, so they only pass an unbounded range.
pub fn coerce_number(
    value: Option<&Value>,
    default: Option<f64>,
    min: f64,
    max: f64,
    path: &SchemaPath,
) -> MeshResult<f64> {
    let Some(value) = value else {
        return default.ok_or_else(|| MeshError::schema(format!("{path}: expected a number")));
    };
    let Value::Number(n) = value else {
        return Err(MeshError::schema(format!("{path}: not a number")));
    };
    // Literals beyond the f64 range read as infinities instead of failing the parse.
    let n = n
        .to_string()
        .parse::<f64>()
        .map_err(|_| MeshError::schema(format!("{path}: not a number")))?;
    check_range(n, min, max, path)
}

/// Reject NaN and values outside the inclusive range `[min, max]`.
pub fn check_range(n: f64, min: f64, max: f64, path: &SchemaPath) -> MeshResult<f64> {
    if n.is_nan() {
        return Err(MeshError::range(format!("{path}: not a number")));
    }
    if n < min || n > max {
        return Err(MeshError::range(format!(
            "{path}: number not in range [{min},{max}]"
        )));
    }
    Ok(n)
}

/// Coerce an `{r, g, b}` color object with every channel in `[0, 1]`.
///
/// A missing color falls back to `default`; a missing channel is always an error.
pub fn coerce_color(
    value: Option<&Value>,
    default: Option<Rgb>,
    path: &SchemaPath,
) -> MeshResult<Rgb> {
    let Some(value) = value else {
        return default.ok_or_else(|| MeshError::schema(format!("{path}: expected a color")));
    };
    let obj = coerce_object(value, COLOR_KEYS, path)?;
    let channel = |name: &'static str| {
        coerce_number(obj.get(name), None, 0.0, 1.0, &path.field(name))
    };
    Ok(Rgb::new(channel("r")?, channel("g")?, channel("b")?))
}

/// Coerce a layer name.
///
/// Accepted names are non-empty and only contain ASCII word characters, space, and
/// ``? ! { } [ ] ( ) " ' \ - + * / $ % & = _ . , # @``.
pub fn coerce_layer_name(
    value: Option<&Value>,
    default: Option<&str>,
    path: &SchemaPath,
) -> MeshResult<String> {
    let Some(value) = value else {
        return default
            .map(str::to_owned)
            .ok_or_else(|| MeshError::schema(format!("{path}: expected a layer name")));
    };
    let name = value
        .as_str()
        .ok_or_else(|| MeshError::schema(format!("{path}: name is not a string")))?;
    if name.is_empty() || !name.chars().all(is_layer_name_char) {
        return Err(MeshError::range(format!(
            "{path}: name contains invalid characters"
        )));
    }
    Ok(name.to_owned())
}

fn is_layer_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            ' ' | '?'
                | '!'
                | '{'
                | '}'
                | '['
                | ']'
                | '('
                | ')'
                | '"'
                | '\''
                | '\\'
                | '-'
                | '+'
                | '*'
                | '/'
                | '$'
                | '%'
                | '&'
                | '='
                | '_'
                | '.'
                | ','
                | '#'
                | '@'
        )
}

/// Coerce one of `"linear"`, `"bezier"`, `"continuous_bezier"`, `"auto_bezier"`.
pub fn coerce_interpolation(
    value: Option<&Value>,
    default: Option<Interpolation>,
    path: &SchemaPath,
) -> MeshResult<Interpolation> {
    let Some(value) = value else {
        return default.ok_or_else(|| {
            MeshError::schema(format!("{path}: expected an interpolation type"))
        });
    };
    let name = value.as_str().ok_or_else(|| {
        MeshError::schema(format!("{path}: interpolation type is not a string"))
    })?;
    Interpolation::from_name(name).ok_or_else(|| {
        MeshError::range(format!("{path}: unknown interpolation type \"{name}\""))
    })
}

/// Closed-schema check: `value` must be an object whose members all appear in `allowed`.
///
/// Presence of allowed members is not checked here; per-field coercion decides that.
pub fn coerce_object<'a>(
    value: &'a Value,
    allowed: &[&str],
    path: &SchemaPath,
) -> MeshResult<&'a Map<String, Value>> {
    let obj = value
        .as_object()
        .ok_or_else(|| MeshError::schema(format!("{path}: not an object")))?;
    if let Some(key) = obj.keys().find(|k| !allowed.contains(&k.as_str())) {
        return Err(MeshError::schema(format!(
            "{path}: unexpected property '{key}'"
        )));
    }
    Ok(obj)
}

/// Require a JSON array.
pub fn coerce_list<'a>(value: Option<&'a Value>, path: &SchemaPath) -> MeshResult<&'a [Value]> {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| MeshError::schema(format!("{path}: expected a list")))
}

#[cfg(test)]
#[path = "../../tests/unit/schema/coerce.rs"]
mod tests;
