//! JSON codec for field schemas.
//!
//! A schema is an array mixing `{"section": "..."}` markers and descriptor
//! objects. Loading goes through [`Registry::new`], so malformed paths and
//! unknown types are rejected here, before any form opens.

use serde_json::{json, Map, Value};

use crate::schema::types::{
    FieldDescriptor, FieldType, Registry, RegistryEntry, SchemaEntry, SchemaError, SelectOption,
};

/// Load a registry from its JSON form.
///
/// # Example
///
/// ```
/// use fieldbind::schema::codec::registry_from_json;
/// use serde_json::json;
///
/// let registry = registry_from_json(&json!([
///     {"section": "Twitter"},
///     {"key": "twitter.image", "type": "text"},
/// ]))
/// .unwrap();
/// assert!(registry.field("twitter.image").is_some());
/// ```
pub fn registry_from_json(v: &Value) -> Result<Registry, SchemaError> {
    let arr = v
        .as_array()
        .ok_or_else(|| SchemaError::MalformedEntry("schema must be an array".into()))?;
    let mut entries = Vec::with_capacity(arr.len());
    for item in arr {
        entries.push(entry_from_json(item)?);
    }
    Registry::new(entries)
}

fn entry_from_json(v: &Value) -> Result<SchemaEntry, SchemaError> {
    let obj = v
        .as_object()
        .ok_or_else(|| SchemaError::MalformedEntry("entry must be an object".into()))?;

    if let Some(section) = obj.get("section") {
        let title = section
            .as_str()
            .ok_or_else(|| SchemaError::MalformedEntry("section must be a string".into()))?;
        return Ok(SchemaEntry::section(title));
    }

    let key = obj
        .get("key")
        .and_then(Value::as_str)
        .ok_or_else(|| SchemaError::MalformedEntry("field entry needs a string key".into()))?;
    let type_str = obj.get("type").and_then(Value::as_str).unwrap_or("text");
    let mut descriptor = FieldDescriptor::new(key, FieldType::from_str(type_str)?);

    if let Some(label) = obj.get("label").and_then(Value::as_str) {
        descriptor = descriptor.with_label(label);
    }
    if let Some(placeholder) = obj.get("placeholder").and_then(Value::as_str) {
        descriptor = descriptor.with_placeholder(placeholder);
    }
    if obj.get("required").and_then(Value::as_bool).unwrap_or(false) {
        descriptor = descriptor.required();
    }
    if let Some(options) = obj.get("options") {
        descriptor = descriptor.with_options(options_from_json(options)?);
    }
    Ok(SchemaEntry::field(descriptor))
}

fn options_from_json(v: &Value) -> Result<Vec<SelectOption>, SchemaError> {
    let arr = v
        .as_array()
        .ok_or_else(|| SchemaError::MalformedEntry("options must be an array".into()))?;
    let mut options = Vec::with_capacity(arr.len());
    for item in arr {
        match item {
            // Shorthand: a bare string is both id and label.
            Value::String(s) => options.push(SelectOption::new(s.clone(), s.clone())),
            Value::Object(map) => {
                let id = map
                    .get("id")
                    .and_then(Value::as_str)
                    .ok_or_else(|| SchemaError::MalformedEntry("option needs a string id".into()))?;
                let label = map.get("label").and_then(Value::as_str).unwrap_or(id);
                options.push(SelectOption::new(id, label));
            }
            _ => {
                return Err(SchemaError::MalformedEntry(
                    "option must be a string or an {id, label} object".into(),
                ))
            }
        }
    }
    Ok(options)
}

/// Serialize a registry back to its JSON form. Derived labels are not
/// materialized; only what was authored round-trips.
pub fn registry_to_json(registry: &Registry) -> Value {
    let entries: Vec<Value> = registry
        .iter()
        .map(|entry| match entry {
            RegistryEntry::Section(marker) => json!({"section": marker.section}),
            RegistryEntry::Field(field) => {
                let d = &field.descriptor;
                let mut m = Map::new();
                m.insert("key".into(), json!(d.key));
                if let Some(label) = &d.label {
                    m.insert("label".into(), json!(label));
                }
                m.insert("type".into(), json!(d.field_type.as_str()));
                if !d.options.is_empty() {
                    let options: Vec<Value> = d
                        .options
                        .iter()
                        .map(|o| json!({"id": o.id, "label": o.label}))
                        .collect();
                    m.insert("options".into(), Value::Array(options));
                }
                if d.required {
                    m.insert("required".into(), json!(true));
                }
                if let Some(placeholder) = &d.placeholder {
                    m.insert("placeholder".into(), json!(placeholder));
                }
                Value::Object(m)
            }
        })
        .collect();
    Value::Array(entries)
}
