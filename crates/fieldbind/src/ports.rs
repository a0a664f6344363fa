//! Collaborator ports.
//!
//! The binding core never talks to a transport; it sees these seams only.
//! A persistence collaborator accepts any subset of declared fields — an
//! absent field means "leave unchanged" on update and "use default" on
//! create.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// User-displayable rejection from the persistence collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct PersistenceError {
    pub message: String,
}

impl PersistenceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Record storage behind an opaque request/response boundary.
pub trait Persistence {
    /// Create a record; returns the new id.
    fn create(&mut self, record: &Value) -> Result<String, PersistenceError>;
    /// Update the record with the given id.
    fn update(&mut self, id: &str, record: &Value) -> Result<(), PersistenceError>;
    fn list(&self) -> Result<Vec<Value>, PersistenceError>;
}

/// One choice served by the reference-list collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub id: String,
    pub label: String,
}

impl ReferenceEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Supplies `{id, label}` pairs for foreign-key selects, keyed by the
/// descriptor key they back.
pub trait ReferenceSource {
    fn entries(&self, field_key: &str) -> Vec<ReferenceEntry>;

    /// Whether `id` is a known reference for `field_key`.
    fn contains(&self, field_key: &str, id: &str) -> bool {
        self.entries(field_key).iter().any(|e| e.id == id)
    }
}
