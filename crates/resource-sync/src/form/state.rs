//! Field and form state.

use super::validator::ValidationError;

/// One input of a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormField {
    pub value: String,
    /// Set on blur or on a submit attempt.
    pub touched: bool,
    /// Set once the user changes the value.
    pub dirty: bool,
    /// Every failing validator, in declaration order. Empty means valid.
    pub errors: Vec<ValidationError>,
    /// Whether the field has a `required` validator.
    pub required: bool,
}

impl FormField {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    /// The message to show next to the input: the first error, once touched.
    pub fn visible_error(&self) -> Option<&str> {
        if self.touched {
            self.first_error()
        } else {
            None
        }
    }
}

/// All fields of a form, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormModel {
    pub fields: Vec<(&'static str, FormField)>,
}

impl FormModel {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, f)| f)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, f)| f)
    }

    /// The raw value of a field; empty if there is no such field.
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(|f| f.value.as_str()).unwrap_or("")
    }

    /// True when every required field is free of errors.
    pub fn valid(&self) -> bool {
        self.fields
            .iter()
            .filter(|(_, f)| f.required)
            .all(|(_, f)| f.is_valid())
    }

    pub fn touched(&self) -> bool {
        self.fields.iter().any(|(_, f)| f.touched)
    }

    pub fn dirty(&self) -> bool {
        self.fields.iter().any(|(_, f)| f.dirty)
    }

    /// `(field, message)` for every field currently showing an error.
    pub fn visible_errors(&self) -> Vec<(&'static str, String)> {
        self.fields
            .iter()
            .filter_map(|(name, f)| f.visible_error().map(|m| (*name, m.to_string())))
            .collect()
    }
}
