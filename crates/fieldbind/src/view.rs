//! Read-only rendering.
//!
//! Same registry as the editor, different strategy: each descriptor's value
//! is resolved through the path crate and formatted per control type. The
//! function is pure; rich composite blocks (image and video previews) are
//! presentational glue layered outside this loop.

use serde_json::Value;

use crate::schema::{BoundField, FieldType, Registry, RegistryEntry};
use crate::value::{is_empty, scalar_id};

/// What an empty field renders as. Never a blank cell.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    /// `None` for fields appearing before the first section marker.
    pub title: Option<String>,
    pub fields: Vec<FieldView>,
}

/// Produce the grouped read-only presentation of `record`.
///
/// Sections come out in registry order. A section whose fields are all empty
/// is omitted entirely; inside a rendered section, empty fields show
/// [`PLACEHOLDER`].
pub fn render(record: &Value, registry: &Registry) -> Vec<SectionView> {
    let mut out = Vec::new();
    let mut title: Option<String> = None;
    let mut fields: Vec<FieldView> = Vec::new();
    let mut any_value = false;

    for entry in registry.iter() {
        match entry {
            RegistryEntry::Section(marker) => {
                if any_value {
                    out.push(SectionView {
                        title: title.take(),
                        fields: std::mem::take(&mut fields),
                    });
                } else {
                    fields.clear();
                }
                title = Some(marker.section.clone());
                any_value = false;
            }
            RegistryEntry::Field(field) => {
                let formatted = fieldbind_path::get(record, &field.path)
                    .and_then(|value| format_value(value, field));
                if formatted.is_some() {
                    any_value = true;
                }
                fields.push(FieldView {
                    label: field.label(),
                    value: formatted.unwrap_or_else(|| PLACEHOLDER.to_string()),
                });
            }
        }
    }
    if any_value {
        out.push(SectionView { title, fields });
    }
    out
}

/// Format one resolved value, or `None` if it counts as empty.
fn format_value(value: &Value, field: &BoundField) -> Option<String> {
    if is_empty(value) {
        return None;
    }
    match field.descriptor.field_type {
        FieldType::Checkbox => Some(yes_no(value)),
        FieldType::Select => Some(select_label(value, field)),
        _ => Some(display_value(value)),
    }
}

fn yes_no(value: &Value) -> String {
    if value.as_bool().unwrap_or(false) {
        "Yes".to_string()
    } else {
        "No".to_string()
    }
}

/// The matching option label, or the raw value when the id is unknown.
fn select_label(value: &Value, field: &BoundField) -> String {
    if let Some(id) = scalar_id(value) {
        if let Some(option) = field.descriptor.options.iter().find(|o| o.id == id) {
            return option.label.clone();
        }
        return id;
    }
    display_value(value)
}

/// Type-independent read formatting:
/// array → delimiter-joined list; object carrying a `name` → that name
/// (foreign-key dereference convention); other object → compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter(|item| !is_empty(item))
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => match map.get("name").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => value.to_string(),
        },
        Value::Null => String::new(),
    }
}
