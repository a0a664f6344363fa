//! Field schema: the single ordered list that drives both surfaces.
//!
//! Iterating the registry and binding each descriptor through the path crate
//! reproduces the full edit surface; handing the same registry to the view
//! module reproduces the detail view. No field list is duplicated anywhere.

pub mod codec;
mod types;

pub use types::{
    derive_label, BoundField, FieldDescriptor, FieldType, Registry, RegistryEntry, SchemaEntry,
    SchemaError, SectionMarker, SelectOption,
};
