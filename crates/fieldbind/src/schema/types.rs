//! Schema types: section markers, field descriptors, and the registry that
//! binds them to parsed paths.

use fieldbind_path::{parse_path, ParseError, Path, TypeHint};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("bad path in field {key:?}: {source}")]
    BadPath { key: String, source: ParseError },
    #[error("duplicate field key {0:?}")]
    DuplicateKey(String),
    #[error("unknown field type {0:?}")]
    UnknownType(String),
    #[error("malformed schema entry: {0}")]
    MalformedEntry(String),
}

/// Control type of a field. Decides the write-time coercion and the
/// read-side formatting; nothing else in the pipeline branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Select,
    Checkbox,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, SchemaError> {
        match s {
            "text" => Ok(FieldType::Text),
            "textarea" => Ok(FieldType::Textarea),
            "number" => Ok(FieldType::Number),
            "select" => Ok(FieldType::Select),
            "checkbox" => Ok(FieldType::Checkbox),
            other => Err(SchemaError::UnknownType(other.to_string())),
        }
    }

    /// Coercion the writer applies for this control type.
    pub fn type_hint(&self) -> Option<TypeHint> {
        match self {
            FieldType::Number => Some(TypeHint::Number),
            _ => None,
        }
    }
}

/// One `{id, label}` choice of a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Pure grouping marker; carries no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMarker {
    pub section: String,
}

/// Declarative mapping from a path to a control, independent of the record's
/// runtime shape.
///
/// A `select` descriptor with static `options` is constrained to those ids; a
/// `select` with no static options is a foreign-key field whose ids come from
/// the reference-list collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub key: String,
    pub label: Option<String>,
    pub field_type: FieldType,
    pub options: Vec<SelectOption>,
    pub required: bool,
    pub placeholder: Option<String>,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            label: None,
            field_type,
            options: Vec::new(),
            required: false,
            placeholder: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// True for selects whose ids come from the reference-list collaborator.
    pub fn is_foreign_key(&self) -> bool {
        self.field_type == FieldType::Select && self.options.is_empty()
    }
}

/// Registry entry as authored: a marker or a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaEntry {
    Section(SectionMarker),
    Field(FieldDescriptor),
}

impl SchemaEntry {
    pub fn section(title: impl Into<String>) -> Self {
        SchemaEntry::Section(SectionMarker {
            section: title.into(),
        })
    }

    pub fn field(descriptor: FieldDescriptor) -> Self {
        SchemaEntry::Field(descriptor)
    }
}

/// A descriptor bound to its parsed path.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundField {
    pub descriptor: FieldDescriptor,
    pub path: Path,
}

impl BoundField {
    /// Explicit label, or one derived from the key
    /// (`"twitter.image"` → `"Twitter Image"`).
    pub fn label(&self) -> String {
        match &self.descriptor.label {
            Some(label) => label.clone(),
            None => derive_label(&self.descriptor.key),
        }
    }
}

/// Registry entry after binding.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEntry {
    Section(SectionMarker),
    Field(BoundField),
}

/// The single ordered field list shared, unmodified, by the editor and the
/// viewer. Binding happens once, here; a malformed path constant fails the
/// load instead of surfacing mid-session.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
    by_key: IndexMap<String, usize>,
}

impl Registry {
    pub fn new(entries: Vec<SchemaEntry>) -> Result<Self, SchemaError> {
        let mut bound = Vec::with_capacity(entries.len());
        let mut by_key = IndexMap::new();
        for entry in entries {
            match entry {
                SchemaEntry::Section(marker) => bound.push(RegistryEntry::Section(marker)),
                SchemaEntry::Field(descriptor) => {
                    let path = parse_path(&descriptor.key).map_err(|source| SchemaError::BadPath {
                        key: descriptor.key.clone(),
                        source,
                    })?;
                    if by_key.insert(descriptor.key.clone(), bound.len()).is_some() {
                        return Err(SchemaError::DuplicateKey(descriptor.key));
                    }
                    bound.push(RegistryEntry::Field(BoundField { descriptor, path }));
                }
            }
        }
        Ok(Self {
            entries: bound,
            by_key,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    /// All bound fields, in registry order.
    pub fn fields(&self) -> impl Iterator<Item = &BoundField> {
        self.entries.iter().filter_map(|entry| match entry {
            RegistryEntry::Field(field) => Some(field),
            RegistryEntry::Section(_) => None,
        })
    }

    pub fn field(&self, key: &str) -> Option<&BoundField> {
        let index = *self.by_key.get(key)?;
        match &self.entries[index] {
            RegistryEntry::Field(field) => Some(field),
            RegistryEntry::Section(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Humanize a path key: dots and underscores become word breaks, camelCase
/// splits, bracket indices drop. `"openGraph.video.width"` → `"Open Graph
/// Video Width"`.
pub fn derive_label(key: &str) -> String {
    let mut words = Vec::new();
    for token in key.split('.') {
        let name = token.split('[').next().unwrap_or(token);
        split_words(name, &mut words);
    }
    let mut out = String::with_capacity(key.len());
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

fn split_words(name: &str, words: &mut Vec<String>) {
    let mut current = String::new();
    for ch in name.chars() {
        if ch == '_' || ch == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if ch.is_ascii_uppercase() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.push(ch.to_ascii_lowercase());
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
}
