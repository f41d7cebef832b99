//! # Form Validation Engine
//!
//! A [`Form`] holds the live values of one form, re-validates a field synchronously on
//! every change and aggregates the result into a single submission gate.
//!
//! - [`FormSchema`] declares fields, defaults and validators.
//! - [`FormModel`] / [`FormField`] are the plain state the view reads.
//! - [`FormEntity`] ties a record type to its schema and payload conversions.
//!
//! Errors are only *shown* once a field is touched (blurred, or a submit was attempted),
//! but they are always computed, so the gate is correct before the user touches anything.

pub mod binding;
pub mod schema;
pub mod state;
pub mod validator;

pub use binding::FormEntity;
pub use schema::FormSchema;
pub use state::{FormField, FormModel};
pub use validator::{Rule, ValidationError, Validator};

use crate::reactive::{Computed, Observable};
use std::rc::Rc;
use tracing::warn;

/// A live form. Cloning shares the same state.
#[derive(Clone, Debug)]
pub struct Form {
    schema: Rc<FormSchema>,
    state: Observable<FormModel>,
}

impl Form {
    pub fn new(schema: FormSchema) -> Self {
        let state = Observable::new(schema.initial_model());
        Self {
            schema: Rc::new(schema),
            state,
        }
    }

    /// User input: store the value, mark the field dirty and re-validate it.
    pub fn set_value(&self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if !self.schema.contains(name) {
            warn!(field = name, "set_value on an unknown field");
            return;
        }
        let errors = self.schema.validate(name, &value);
        self.state.update(|model| {
            if let Some(field) = model.field_mut(name) {
                field.value = value;
                field.dirty = true;
                field.errors = errors;
            }
        });
    }

    /// The input lost focus.
    pub fn blur(&self, name: &str) {
        self.state.update(|model| {
            if let Some(field) = model.field_mut(name) {
                field.touched = true;
            }
        });
    }

    /// Re-validate every field and mark it touched, so every error becomes visible.
    pub fn mark_all_touched(&self) {
        let schema = Rc::clone(&self.schema);
        self.state.update(|model| {
            for (name, field) in &mut model.fields {
                field.errors = schema.validate(*name, &field.value);
                field.touched = true;
            }
        });
    }

    /// Back to the defaults: untouched, clean.
    pub fn reset(&self) {
        self.state.set(self.schema.initial_model());
    }

    /// Start over from an existing record's values. The result is untouched and clean.
    pub fn load(&self, values: Vec<(&'static str, String)>) {
        let mut model = self.schema.initial_model();
        for (name, value) in values {
            match model.field_mut(name) {
                Some(field) => {
                    field.errors = self.schema.validate(name, &value);
                    field.value = value;
                }
                None => warn!(field = name, "load() ignoring an unknown field"),
            }
        }
        self.state.set(model);
    }

    pub fn snapshot(&self) -> FormModel {
        self.state.get()
    }

    pub fn value(&self, name: &str) -> String {
        self.state.with(|m| m.value(name).to_string())
    }

    pub fn errors(&self, name: &str) -> Vec<ValidationError> {
        self.state
            .with(|m| m.field(name).map(|f| f.errors.clone()))
            .unwrap_or_default()
    }

    pub fn touched(&self, name: &str) -> bool {
        self.state
            .with(|m| m.field(name).map(|f| f.touched))
            .unwrap_or(false)
    }

    pub fn valid(&self, name: &str) -> bool {
        self.state
            .with(|m| m.field(name).map(FormField::is_valid))
            .unwrap_or(true)
    }

    pub fn visible_error(&self, name: &str) -> Option<String> {
        self.state
            .with(|m| m.field(name).and_then(|f| f.visible_error().map(str::to_string)))
    }

    /// The submission gate.
    pub fn can_submit(&self) -> bool {
        self.state.with(FormModel::valid)
    }

    pub fn can_submit_signal(&self) -> Computed<bool> {
        Computed::from_observable(&self.state, FormModel::valid)
    }

    /// Whether the form holds exactly its default model.
    pub fn is_default(&self) -> bool {
        self.state.with(|m| *m == self.schema.initial_model())
    }

    pub fn state(&self) -> &Observable<FormModel> {
        &self.state
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }
}
