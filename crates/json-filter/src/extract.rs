//! Typed field extraction from JSON objects.
//!
//! Every kind of value has an `optional_*` and a `required_*` form:
//!
//! - `optional_*` returns `Ok(None)` when the key is absent or holds `null`.
//!   It fails with [`ParsingError::InvalidValue`] when the key holds a value
//!   of the wrong type.
//! - `required_*` additionally fails with [`ParsingError::Missing`] when there
//!   is no value.
//!
//! The `*_list` forms read an array and convert each element. A bad element
//! fails the whole list with [`ParsingError::InvalidList`].

use crate::error::ParsingError;
use serde_json::{Map, Value};
use std::path::PathBuf;

type Object = Map<String, Value>;
type ParseResult<T> = std::result::Result<T, ParsingError>;

// ---------------------------------------------------------------------------
// Element extractors
// ---------------------------------------------------------------------------

pub fn as_object(value: &Value) -> Option<&Object> {
    value.as_object()
}

pub fn as_array(value: &Value) -> Option<&Vec<Value>> {
    value.as_array()
}

pub fn as_string(value: &Value) -> Option<&str> {
    value.as_str()
}

/// Integral numbers that fit in an `i32`.
pub fn as_int(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|n| i32::try_from(n).ok())
}

/// Any JSON number, or the string `"NaN"` since JSON has no NaN literal.
pub fn as_double(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| (value.as_str() == Some("NaN")).then_some(f64::NAN))
}

/// A string that can name a filesystem path (no NUL bytes).
pub fn as_path(value: &Value) -> Option<PathBuf> {
    value
        .as_str()
        .filter(|s| !s.contains('\0'))
        .map(PathBuf::from)
}

// ---------------------------------------------------------------------------
// Generic extraction
// ---------------------------------------------------------------------------

/// Extract `key` with `extractor`. `description` names the expected type
/// in the error message.
pub fn extract_optional<'a, T>(
    json: &'a Object,
    key: &str,
    extractor: impl Fn(&'a Value) -> Option<T>,
    description: &str,
) -> ParseResult<Option<T>> {
    match json.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => extractor(value)
            .map(Some)
            .ok_or_else(|| ParsingError::InvalidValue {
                key: key.to_string(),
                description: description.to_string(),
            }),
    }
}

pub fn extract_required<'a, T>(
    json: &'a Object,
    key: &str,
    extractor: impl Fn(&'a Value) -> Option<T>,
    description: &str,
) -> ParseResult<T> {
    let value = extract_optional(json, key, extractor, description)?;
    ensure_required(key, value)
}

/// Read `key` as an array and convert every element with `extractor`.
pub fn extract_optional_list<'a, T>(
    json: &'a Object,
    key: &str,
    extractor: impl Fn(&'a Value) -> Option<T>,
    description: &str,
) -> ParseResult<Option<Vec<T>>> {
    let Some(array) = optional_array(json, key)? else {
        return Ok(None);
    };
    array
        .iter()
        .map(&extractor)
        .collect::<Option<Vec<T>>>()
        .map(Some)
        .ok_or_else(|| ParsingError::InvalidList {
            key: key.to_string(),
            description: description.to_string(),
        })
}

pub fn extract_required_list<'a, T>(
    json: &'a Object,
    key: &str,
    extractor: impl Fn(&'a Value) -> Option<T>,
    description: &str,
) -> ParseResult<Vec<T>> {
    let value = extract_optional_list(json, key, extractor, description)?;
    ensure_required(key, value)
}

pub fn ensure_required<T>(key: &str, value: Option<T>) -> ParseResult<T> {
    value.ok_or_else(|| ParsingError::Missing {
        key: key.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Single values
// ---------------------------------------------------------------------------

/// Any non-null value.
pub fn optional_value<'a>(json: &'a Object, key: &str) -> Option<&'a Value> {
    json.get(key).filter(|v| !v.is_null())
}

pub fn required_value<'a>(json: &'a Object, key: &str) -> ParseResult<&'a Value> {
    ensure_required(key, optional_value(json, key))
}

pub fn optional_object<'a>(json: &'a Object, key: &str) -> ParseResult<Option<&'a Object>> {
    extract_optional(json, key, as_object, "object")
}

pub fn required_object<'a>(json: &'a Object, key: &str) -> ParseResult<&'a Object> {
    extract_required(json, key, as_object, "object")
}

pub fn optional_array<'a>(json: &'a Object, key: &str) -> ParseResult<Option<&'a Vec<Value>>> {
    extract_optional(json, key, as_array, "array")
}

pub fn required_array<'a>(json: &'a Object, key: &str) -> ParseResult<&'a Vec<Value>> {
    extract_required(json, key, as_array, "array")
}

pub fn optional_string<'a>(json: &'a Object, key: &str) -> ParseResult<Option<&'a str>> {
    extract_optional(json, key, as_string, "string")
}

pub fn required_string<'a>(json: &'a Object, key: &str) -> ParseResult<&'a str> {
    extract_required(json, key, as_string, "string")
}

pub fn optional_int(json: &Object, key: &str) -> ParseResult<Option<i32>> {
    extract_optional(json, key, as_int, "integer")
}

pub fn required_int(json: &Object, key: &str) -> ParseResult<i32> {
    extract_required(json, key, as_int, "integer")
}

pub fn optional_double(json: &Object, key: &str) -> ParseResult<Option<f64>> {
    extract_optional(json, key, as_double, "double")
}

pub fn required_double(json: &Object, key: &str) -> ParseResult<f64> {
    extract_required(json, key, as_double, "double")
}

pub fn optional_path(json: &Object, key: &str) -> ParseResult<Option<PathBuf>> {
    extract_optional(json, key, as_path, "path")
}

pub fn required_path(json: &Object, key: &str) -> ParseResult<PathBuf> {
    extract_required(json, key, as_path, "path")
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

pub fn optional_object_list<'a>(
    json: &'a Object,
    key: &str,
) -> ParseResult<Option<Vec<&'a Object>>> {
    extract_optional_list(json, key, as_object, "objects")
}

pub fn required_object_list<'a>(json: &'a Object, key: &str) -> ParseResult<Vec<&'a Object>> {
    extract_required_list(json, key, as_object, "objects")
}

pub fn optional_string_list<'a>(json: &'a Object, key: &str) -> ParseResult<Option<Vec<&'a str>>> {
    extract_optional_list(json, key, as_string, "strings")
}

pub fn required_string_list<'a>(json: &'a Object, key: &str) -> ParseResult<Vec<&'a str>> {
    extract_required_list(json, key, as_string, "strings")
}

pub fn optional_int_list(json: &Object, key: &str) -> ParseResult<Option<Vec<i32>>> {
    extract_optional_list(json, key, as_int, "integers")
}

pub fn required_int_list(json: &Object, key: &str) -> ParseResult<Vec<i32>> {
    extract_required_list(json, key, as_int, "integers")
}

pub fn optional_double_list(json: &Object, key: &str) -> ParseResult<Option<Vec<f64>>> {
    extract_optional_list(json, key, as_double, "doubles")
}

pub fn required_double_list(json: &Object, key: &str) -> ParseResult<Vec<f64>> {
    extract_required_list(json, key, as_double, "doubles")
}

/// An array of arrays of objects.
pub fn optional_object_list_of_list<'a>(
    json: &'a Object,
    key: &str,
) -> ParseResult<Option<Vec<Vec<&'a Object>>>> {
    extract_optional_list(
        json,
        key,
        |value: &'a Value| {
            value
                .as_array()?
                .iter()
                .map(as_object)
                .collect::<Option<Vec<_>>>()
        },
        "object lists",
    )
}

pub fn required_object_list_of_list<'a>(
    json: &'a Object,
    key: &str,
) -> ParseResult<Vec<Vec<&'a Object>>> {
    let lists = optional_object_list_of_list(json, key)?;
    ensure_required(key, lists)
}

// ---------------------------------------------------------------------------
// Array conversion
// ---------------------------------------------------------------------------

/// Convert every element of `array` with `extractor`.
pub fn convert_to_list<'a, T>(
    array: &'a [Value],
    extractor: impl Fn(&'a Value) -> Option<T>,
) -> ParseResult<Vec<T>> {
    array
        .iter()
        .map(extractor)
        .collect::<Option<Vec<T>>>()
        .ok_or(ParsingError::InvalidArray)
}

/// Like [`convert_to_list`], but the array must hold exactly `expected`
/// elements.
pub fn convert_to_list_exact<'a, T>(
    array: &'a [Value],
    extractor: impl Fn(&'a Value) -> Option<T>,
    expected: usize,
) -> ParseResult<Vec<T>> {
    if array.len() != expected {
        return Err(ParsingError::WrongCount {
            expected,
            found: array.len(),
        });
    }
    convert_to_list(array, extractor)
}

pub fn convert_to_object_list(array: &[Value]) -> ParseResult<Vec<&Object>> {
    convert_to_list(array, as_object)
}
