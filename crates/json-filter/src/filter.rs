//! Filter engine: prune a JSON document in place according to a
//! [`FilterSpecification`].
//!
//! # Semantics
//!
//! - **Include** (`a,b(c)`): an object keeps only the fields named by the
//!   node's children. Kept fields whose child node has children of its own are
//!   narrowed further. A field whose child is a leaf is kept whole.
//! - **Exclude** (`-a,b(c)`): a leaf child removes its field. A child with
//!   children only removes fields inside the named field's value.
//! - **Passthrough** (empty specification): nothing happens.
//!
//! Arrays are transparent. The same node is applied to every element, and an
//! array is never removed or resized by the filter itself. Missing fields
//! and scalar values are skipped silently, so filtering never fails.

use crate::error::Result;
use crate::node::{FilterType, NodeRef};
use crate::specification::FilterSpecification;
use serde_json::{Map, Value};

/// Something that can narrow a document of type `T` with a filter
/// specification.
///
/// Implementations mutate `target` in place and hand the same reference
/// back, so calls can be chained.
pub trait JsonFilter<T: ?Sized> {
    fn apply<'a>(&self, target: &'a mut T, spec: &FilterSpecification) -> &'a mut T;
}

/// The filter engine for `serde_json` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonObjectFilter;

impl JsonObjectFilter {
    /// Apply `spec` to a copy of `value`, leaving the original untouched.
    pub fn filtered(&self, value: &Value, spec: &FilterSpecification) -> Value {
        let mut copy = value.clone();
        self.apply(&mut copy, spec);
        copy
    }
}

impl JsonFilter<Value> for JsonObjectFilter {
    fn apply<'a>(&self, target: &'a mut Value, spec: &FilterSpecification) -> &'a mut Value {
        tracing::debug!(filter = %spec, mode = ?spec.filter_type(), "applying filter");
        apply_node(spec.root(), target);
        target
    }
}

impl JsonFilter<Map<String, Value>> for JsonObjectFilter {
    fn apply<'a>(
        &self,
        target: &'a mut Map<String, Value>,
        spec: &FilterSpecification,
    ) -> &'a mut Map<String, Value> {
        tracing::debug!(filter = %spec, mode = ?spec.filter_type(), "applying filter");
        let root = spec.root();
        match root.filter_type() {
            FilterType::Include => include_fields(root, target),
            FilterType::Exclude => exclude_fields(root, target),
            FilterType::Passthrough => {}
        }
        target
    }
}

/// Apply `spec` to `value` in place and return the same reference.
///
/// # Examples
///
/// ```
/// use json_filter::{apply_filter, FilterSpecification};
/// use serde_json::json;
///
/// let mut value = json!({"a": {"b": 1, "c": 2}, "d": 3});
/// let fs = FilterSpecification::parse("a.b").unwrap();
/// apply_filter(&mut value, &fs);
/// assert_eq!(value, json!({"a": {"b": 1}}));
/// ```
pub fn apply_filter<'a>(value: &'a mut Value, spec: &FilterSpecification) -> &'a mut Value {
    JsonObjectFilter.apply(value, spec)
}

/// Parse a JSON document and a filter string, filter the document, and
/// serialize it back to compact JSON.
///
/// # Errors
///
/// Returns an error if `filter` is not a valid specification or `json` is not
/// valid JSON.
///
/// ```
/// use json_filter::filter_json;
///
/// let out = filter_json(r#"{"name":"Alice","etag":"x"}"#, "-etag").unwrap();
/// assert_eq!(out, r#"{"name":"Alice"}"#);
/// ```
pub fn filter_json(json: &str, filter: &str) -> Result<String> {
    let spec = FilterSpecification::parse(filter)?;
    let mut value: Value = serde_json::from_str(json)?;
    apply_filter(&mut value, &spec);
    Ok(serde_json::to_string(&value)?)
}

fn apply_node(node: NodeRef<'_>, value: &mut Value) {
    match node.filter_type() {
        FilterType::Include => include_specified(node, value),
        FilterType::Exclude => exclude_specified(node, value),
        FilterType::Passthrough => {}
    }
}

fn exclude_specified(node: NodeRef<'_>, value: &mut Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                apply_node(node, item);
            }
        }
        Value::Object(map) => exclude_fields(node, map),
        _ => {}
    }
}

fn exclude_fields(node: NodeRef<'_>, map: &mut Map<String, Value>) {
    map.retain(|key, _| node.child(key).is_none_or(|child| child.has_children()));

    for child in node.children().filter(|c| c.has_children()) {
        if let Some(value) = child.content().and_then(|name| map.get_mut(name)) {
            apply_node(child, value);
        }
    }
}

fn include_specified(node: NodeRef<'_>, value: &mut Value) {
    if !node.has_children() {
        return;
    }
    match value {
        Value::Array(items) => {
            for item in items {
                apply_node(node, item);
            }
        }
        Value::Object(map) => include_fields(node, map),
        _ => {}
    }
}

fn include_fields(node: NodeRef<'_>, map: &mut Map<String, Value>) {
    if !node.has_children() {
        return;
    }

    map.retain(|key, _| node.child(key).is_some());

    for child in node.children().filter(|c| c.has_children()) {
        if let Some(value) = child.content().and_then(|name| map.get_mut(name)) {
            apply_node(child, value);
        }
    }
}
