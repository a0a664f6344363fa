//! Container-creating writes.
//!
//! A write never fails on shape: intermediates that are missing or of the
//! wrong kind are replaced with the container the path calls for. The
//! returned record satisfies `get(&set(r, p, v), p) == Some(&v)` for every
//! well-formed path.

use crate::types::{Path, Segment};
use serde_json::{Map, Value};

/// Write-time coercion carried by a field's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    /// Numeric fields arrive as text from input controls; parse before
    /// storing so the persisted value is a JSON number, not a string.
    Number,
}

/// Place `value` at `path`, returning a new record.
///
/// The input record is left untouched; every level the write visits exists
/// only in the returned tree, so two form sessions can never alias nested
/// containers.
///
/// # Example
///
/// ```
/// use fieldbind_path::{get, parse_path, set, TypeHint};
/// use serde_json::json;
///
/// let path = parse_path("openGraph.video.width").unwrap();
/// let record = set(&json!({}), &path, json!("640"), Some(TypeHint::Number));
/// assert_eq!(record, json!({"openGraph": {"video": {"width": 640}}}));
/// assert_eq!(get(&record, &path), Some(&json!(640)));
/// ```
pub fn set(record: &Value, path: &Path, value: Value, hint: Option<TypeHint>) -> Value {
    let mut out = record.clone();
    set_in_place(&mut out, path, value, hint);
    out
}

/// Mutating core of [`set`]. An empty path replaces the whole record.
pub fn set_in_place(record: &mut Value, path: &Path, value: Value, hint: Option<TypeHint>) {
    let mut current = record;
    for segment in &path.segments {
        current = descend(current, segment);
    }
    *current = coerce(value, hint);
}

/// Remove the terminal entry addressed by `path`, returning the old value.
///
/// Missing targets are a no-op (`None`); intermediate containers are left in
/// place. An empty path removes nothing.
pub fn remove(record: &mut Value, path: &Path) -> Option<Value> {
    let (last, spine) = path.segments.split_last()?;
    let mut current = record;
    for segment in spine {
        current = step_mut(current, segment)?;
    }
    match last {
        Segment::Property(name) => current.as_object_mut()?.remove(name),
        Segment::Index { array, index } => {
            let arr = current.as_object_mut()?.get_mut(array)?.as_array_mut()?;
            if *index < arr.len() {
                Some(arr.remove(*index))
            } else {
                None
            }
        }
    }
}

/// Walk one segment, creating or replacing intermediates as needed.
fn descend<'a>(current: &'a mut Value, segment: &Segment) -> &'a mut Value {
    match segment {
        Segment::Property(name) => ensure_object(current)
            .entry(name.clone())
            .or_insert(Value::Null),
        Segment::Index { array, index } => {
            let slot = ensure_object(current)
                .entry(array.clone())
                .or_insert(Value::Null);
            let arr = ensure_array(slot);
            if arr.len() <= *index {
                // Sparse slots persist as JSON null.
                arr.resize(*index + 1, Value::Null);
            }
            &mut arr[*index]
        }
    }
}

/// Non-creating mutable walk, for [`remove`].
fn step_mut<'a>(current: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match segment {
        Segment::Property(name) => current.as_object_mut()?.get_mut(name),
        Segment::Index { array, index } => current
            .as_object_mut()?
            .get_mut(array)?
            .as_array_mut()?
            .get_mut(*index),
    }
}

fn ensure_object(slot: &mut Value) -> &mut Map<String, Value> {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn ensure_array(slot: &mut Value) -> &mut Vec<Value> {
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(arr) => arr,
        _ => unreachable!(),
    }
}

fn coerce(value: Value, hint: Option<TypeHint>) -> Value {
    match hint {
        Some(TypeHint::Number) => coerce_number(value),
        None => value,
    }
}

/// Integer-then-float parse. Unparseable input stores `null`, the JSON image
/// of what the original system persisted for a failed numeric parse.
fn coerce_number(value: Value) -> Value {
    match value {
        Value::Number(_) => value,
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(n) = trimmed.parse::<i64>() {
                return Value::Number(n.into());
            }
            match trimmed.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                Some(n) => Value::Number(n),
                None => Value::Null,
            }
        }
        _ => Value::Null,
    }
}
