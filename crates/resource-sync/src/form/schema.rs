//! Declarative form definitions.

use super::state::{FormField, FormModel};
use super::validator::{Rule, ValidationError, Validator};
use tracing::warn;

#[derive(Debug, Clone)]
struct FieldSpec {
    name: &'static str,
    default: String,
    validators: Vec<Validator>,
}

/// The fields of a form, their defaults and their validators.
///
/// ```rust,ignore
/// let schema = FormSchema::new()
///     .field("username", "")
///     .required("username", "Username is required.")
///     .field("email", "")
///     .required("email", "Email is required.")
///     .email("email", "Enter a valid email address.");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, default: impl Into<String>) -> Self {
        self.fields.push(FieldSpec {
            name,
            default: default.into(),
            validators: Vec::new(),
        });
        self
    }

    pub fn required(self, name: &'static str, message: impl Into<String>) -> Self {
        self.add(name, Validator::required(message))
    }

    pub fn pattern(
        self,
        name: &'static str,
        predicate: impl Fn(&str) -> bool + 'static,
        message: impl Into<String>,
    ) -> Self {
        self.add(name, Validator::pattern(Rule::Pattern, predicate, message))
    }

    pub fn email(self, name: &'static str, message: impl Into<String>) -> Self {
        self.add(name, Validator::email(message))
    }

    pub fn integer(self, name: &'static str, message: impl Into<String>) -> Self {
        self.add(name, Validator::integer(message))
    }

    fn add(mut self, name: &'static str, validator: Validator) -> Self {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(spec) => spec.validators.push(validator),
            None => warn!(field = name, "Validator for an undeclared field ignored"),
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Run every validator of `name` against `value`, in declaration order.
    pub fn validate(&self, name: &str, value: &str) -> Vec<ValidationError> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|spec| {
                spec.validators
                    .iter()
                    .filter_map(|v| v.check(value))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A fresh model: defaults, untouched, clean, errors computed against the defaults.
    pub fn initial_model(&self) -> FormModel {
        let fields = self
            .fields
            .iter()
            .map(|spec| {
                let field = FormField {
                    value: spec.default.clone(),
                    touched: false,
                    dirty: false,
                    errors: spec
                        .validators
                        .iter()
                        .filter_map(|v| v.check(&spec.default))
                        .collect(),
                    required: spec.validators.iter().any(Validator::is_required),
                };
                (spec.name, field)
            })
            .collect();
        FormModel { fields }
    }
}
