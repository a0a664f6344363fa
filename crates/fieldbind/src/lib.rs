//! fieldbind — declarative nested-path data binding for JSON records.
//!
//! One ordered field list (section markers + descriptors) drives both an edit
//! form and a grouped read-only view over deeply nested, heterogeneously
//! shaped records. Changes funnel through a single path-addressed write;
//! there is no per-field handler code anywhere.
//!
//! # Example
//!
//! ```
//! use fieldbind::auth::{AuthorizationContext, Capability};
//! use fieldbind::form::FormController;
//! use fieldbind::schema::{FieldDescriptor, FieldType, Registry, SchemaEntry};
//! use fieldbind::view::render;
//! use serde_json::json;
//!
//! let registry = Registry::new(vec![
//!     SchemaEntry::section("Open Graph"),
//!     SchemaEntry::field(FieldDescriptor::new("openGraph.video.width", FieldType::Number)),
//! ])
//! .unwrap();
//!
//! let auth = AuthorizationContext::new(Capability::Mutate);
//! let mut form = FormController::new(&registry, auth);
//! form.open_create().unwrap();
//! form.apply_change("openGraph.video.width", json!("640")).unwrap();
//! assert_eq!(form.record(), &json!({"openGraph": {"video": {"width": 640}}}));
//!
//! let sections = render(form.record(), &registry);
//! assert_eq!(sections[0].fields[0].value, "640");
//! ```

pub mod auth;
pub mod cache;
pub mod form;
pub mod ports;
pub mod schema;
mod value;
pub mod view;

pub use auth::{AuthorizationContext, Capability};
pub use cache::{CachedReferenceSource, Clock, MemoryCache, RequestCache, SystemClock};
pub use form::{FormController, FormError, FormState, SessionMode, SubmitOutcome};
pub use ports::{Persistence, PersistenceError, ReferenceEntry, ReferenceSource};
pub use schema::{
    FieldDescriptor, FieldType, Registry, RegistryEntry, SchemaEntry, SchemaError, SectionMarker,
    SelectOption,
};
pub use view::{render, FieldView, SectionView, PLACEHOLDER};
