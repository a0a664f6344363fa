//! Form controller.
//!
//! Binds exactly one record to the registry. Every change event, at any
//! nesting depth and for any control type, resolves its descriptor's path and
//! funnels through the same write — adding a nested field to the schema is
//! one descriptor entry and zero new handler code.
//!
//! States: `Closed → Editing → { Submitting → Closed | Editing(error) } |
//! Closed`. Writes take effect only at explicit submission, so cancelling a
//! session can never leave a partial effect behind.

use fieldbind_path::{self as path, Segment, TypeHint};
use log::{debug, warn};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::auth::AuthorizationContext;
use crate::ports::{Persistence, PersistenceError, ReferenceSource};
use crate::schema::{FieldType, Registry};
use crate::value::scalar_id;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("mutation is not permitted for this session")]
    Forbidden,
    #[error("a form is already open")]
    AlreadyOpen,
    #[error("no form is open")]
    NotEditing,
    #[error("unknown field {0:?}")]
    UnknownField(String),
    /// Unmet local precondition; surfaced to the user, form stays open.
    #[error("{0}")]
    Validation(String),
    /// Collaborator rejection; form stays editable for manual retry.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Closed,
    Editing,
    Submitting,
}

/// What the open session will do on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    Create,
    Update(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created { id: String },
    Updated,
}

/// One record under edit, bound to one registry, gated by one capability.
pub struct FormController<'a> {
    registry: &'a Registry,
    auth: AuthorizationContext,
    state: FormState,
    mode: SessionMode,
    record: Value,
    last_error: Option<String>,
}

impl<'a> FormController<'a> {
    pub fn new(registry: &'a Registry, auth: AuthorizationContext) -> Self {
        Self {
            registry,
            auth,
            state: FormState::Closed,
            mode: SessionMode::Create,
            record: Value::Null,
            last_error: None,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    /// The record under edit. `Null` while closed.
    pub fn record(&self) -> &Value {
        &self.record
    }

    /// The last validation or persistence message, until the next submit.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Open an empty record for creation.
    pub fn open_create(&mut self) -> Result<(), FormError> {
        self.open(SessionMode::Create, Value::Object(Map::new()))
    }

    /// Open a persisted record for update. Hydration copies, so two sessions
    /// never share a live tree.
    pub fn open_edit(&mut self, id: impl Into<String>, record: &Value) -> Result<(), FormError> {
        self.open(SessionMode::Update(id.into()), record.clone())
    }

    fn open(&mut self, mode: SessionMode, record: Value) -> Result<(), FormError> {
        self.require_mutate()?;
        if self.state != FormState::Closed {
            return Err(FormError::AlreadyOpen);
        }
        debug!("form opened ({mode:?})");
        self.mode = mode;
        self.record = record;
        self.state = FormState::Editing;
        self.last_error = None;
        Ok(())
    }

    /// Handle one change event from any control.
    ///
    /// Resolves the descriptor for `key` and writes `value` at its path with
    /// the descriptor's coercion. A static-options select rejects ids outside
    /// its option list; clearing with an empty string is always allowed.
    pub fn apply_change(&mut self, key: &str, value: Value) -> Result<(), FormError> {
        self.require_mutate()?;
        if self.state != FormState::Editing {
            return Err(FormError::NotEditing);
        }
        let field = self
            .registry
            .field(key)
            .ok_or_else(|| FormError::UnknownField(key.to_string()))?;

        if field.descriptor.field_type == FieldType::Select
            && !field.descriptor.options.is_empty()
            && !is_clearing(&value)
        {
            let id = scalar_id(&value);
            let known = id
                .as_deref()
                .map(|id| field.descriptor.options.iter().any(|o| o.id == id))
                .unwrap_or(false);
            if !known {
                return Err(FormError::Validation(format!(
                    "{} is not an option for {}",
                    value,
                    field.label()
                )));
            }
        }

        let hint = field.descriptor.field_type.type_hint();
        path::set_in_place(&mut self.record, &field.path, value, hint);
        Ok(())
    }

    /// Discard the in-memory record. No partial effect remains.
    pub fn cancel(&mut self) {
        if self.state != FormState::Closed {
            debug!("form cancelled");
        }
        self.state = FormState::Closed;
        self.mode = SessionMode::Create;
        self.record = Value::Null;
        self.last_error = None;
    }

    /// Validate locally, build the submission payload, and hand it to the
    /// persistence collaborator.
    ///
    /// The one locally enforced precondition: every foreign-key select that
    /// carries a value must resolve to a known id from `refs` (and a
    /// `required` one must carry a value). Failure keeps the form open; so
    /// does a collaborator rejection — the user resubmits by hand, there is
    /// no automatic retry.
    pub fn submit(
        &mut self,
        store: &mut dyn Persistence,
        refs: &dyn ReferenceSource,
    ) -> Result<SubmitOutcome, FormError> {
        self.require_mutate()?;
        if self.state != FormState::Editing {
            return Err(FormError::NotEditing);
        }

        if let Err(message) = self.check_foreign_keys(refs) {
            warn!("submission blocked: {message}");
            self.last_error = Some(message.clone());
            return Err(FormError::Validation(message));
        }

        let payload = self.build_payload();
        self.state = FormState::Submitting;
        debug!("submitting ({:?})", self.mode);

        let result = match &self.mode {
            SessionMode::Create => store.create(&payload).map(|id| SubmitOutcome::Created { id }),
            SessionMode::Update(id) => store.update(id, &payload).map(|()| SubmitOutcome::Updated),
        };

        match result {
            Ok(outcome) => {
                debug!("submission accepted");
                self.cancel();
                Ok(outcome)
            }
            Err(err) => {
                warn!("submission rejected: {err}");
                self.state = FormState::Editing;
                self.last_error = Some(err.message.clone());
                Err(FormError::Persistence(err))
            }
        }
    }

    fn require_mutate(&self) -> Result<(), FormError> {
        if self.auth.can_mutate() {
            Ok(())
        } else {
            warn!("mutating event refused: session is {}", self.auth.capability().as_str());
            Err(FormError::Forbidden)
        }
    }

    fn check_foreign_keys(&self, refs: &dyn ReferenceSource) -> Result<(), String> {
        for field in self.registry.fields() {
            if !field.descriptor.is_foreign_key() {
                continue;
            }
            let value = path::get(&self.record, &field.path);
            let id = value.and_then(scalar_id);
            match id {
                None => {
                    if field.descriptor.required {
                        return Err(format!("{} is required", field.label()));
                    }
                }
                Some(id) => {
                    if !refs.contains(&field.descriptor.key, &id) {
                        return Err(format!("{} does not match a known entry", field.label()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Serialize the record for the wire: empty-string fields are stripped
    /// (absence means "leave unchanged" on update, "use default" on create)
    /// and number-typed fields still holding text are coerced. Keys the
    /// registry does not declare pass through untouched.
    fn build_payload(&self) -> Value {
        let mut payload = self.record.clone();
        for field in self.registry.fields() {
            let Some(current) = path::get(&payload, &field.path).cloned() else {
                continue;
            };
            match current {
                Value::String(s) if s.is_empty() => {
                    // Array slots blank out in place; removing would shift
                    // the siblings' addresses.
                    if matches!(field.path.segments.last(), Some(Segment::Index { .. })) {
                        path::set_in_place(&mut payload, &field.path, Value::Null, None);
                    } else {
                        path::remove(&mut payload, &field.path);
                    }
                }
                Value::String(s) if field.descriptor.field_type == FieldType::Number => {
                    path::set_in_place(
                        &mut payload,
                        &field.path,
                        Value::String(s),
                        Some(TypeHint::Number),
                    );
                }
                _ => {}
            }
        }
        payload
    }
}

/// An empty string clears a field rather than setting a value.
fn is_clearing(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.is_empty()) || value.is_null()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Capability;
    use crate::schema::{FieldDescriptor, SchemaEntry, SelectOption};
    use serde_json::json;

    fn registry() -> Registry {
        Registry::new(vec![
            SchemaEntry::field(FieldDescriptor::new("title", FieldType::Text)),
            SchemaEntry::field(
                FieldDescriptor::new("twitter.card", FieldType::Select).with_options(vec![
                    SelectOption::new("summary", "Summary"),
                    SelectOption::new("player", "Player"),
                ]),
            ),
            SchemaEntry::field(FieldDescriptor::new("twitter.player_width", FieldType::Number)),
        ])
        .unwrap()
    }

    fn mutate() -> AuthorizationContext {
        AuthorizationContext::new(Capability::Mutate)
    }

    #[test]
    fn change_events_build_nested_state() {
        let registry = registry();
        let mut form = FormController::new(&registry, mutate());
        form.open_create().unwrap();
        form.apply_change("title", json!("Hello")).unwrap();
        form.apply_change("twitter.player_width", json!("480")).unwrap();
        assert_eq!(
            form.record(),
            &json!({"title": "Hello", "twitter": {"player_width": 480}})
        );
    }

    #[test]
    fn static_select_rejects_unknown_id() {
        let registry = registry();
        let mut form = FormController::new(&registry, mutate());
        form.open_create().unwrap();
        let err = form.apply_change("twitter.card", json!("gallery")).unwrap_err();
        assert!(matches!(err, FormError::Validation(_)));
        assert_eq!(form.record(), &json!({}));

        form.apply_change("twitter.card", json!("player")).unwrap();
        assert_eq!(form.record()["twitter"]["card"], json!("player"));
    }

    #[test]
    fn static_select_allows_clearing() {
        let registry = registry();
        let mut form = FormController::new(&registry, mutate());
        form.open_create().unwrap();
        form.apply_change("twitter.card", json!("")).unwrap();
    }

    #[test]
    fn unknown_field_is_rejected() {
        let registry = registry();
        let mut form = FormController::new(&registry, mutate());
        form.open_create().unwrap();
        assert_eq!(
            form.apply_change("nope", json!(1)),
            Err(FormError::UnknownField("nope".to_string()))
        );
    }

    #[test]
    fn change_requires_open_form() {
        let registry = registry();
        let mut form = FormController::new(&registry, mutate());
        assert_eq!(form.apply_change("title", json!("x")), Err(FormError::NotEditing));
    }

    #[test]
    fn open_twice_is_rejected() {
        let registry = registry();
        let mut form = FormController::new(&registry, mutate());
        form.open_create().unwrap();
        assert_eq!(form.open_create(), Err(FormError::AlreadyOpen));
    }

    #[test]
    fn cancel_discards_state() {
        let registry = registry();
        let mut form = FormController::new(&registry, mutate());
        form.open_create().unwrap();
        form.apply_change("title", json!("Hello")).unwrap();
        form.cancel();
        assert_eq!(form.state(), FormState::Closed);
        assert_eq!(form.record(), &Value::Null);
    }

    #[test]
    fn hydration_copies_the_input() {
        let registry = registry();
        let mut form = FormController::new(&registry, mutate());
        let persisted = json!({"title": "Old"});
        form.open_edit("42", &persisted).unwrap();
        form.apply_change("title", json!("New")).unwrap();
        assert_eq!(persisted, json!({"title": "Old"}));
    }
}
