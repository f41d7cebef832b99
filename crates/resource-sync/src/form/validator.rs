//! Field validators.
//!
//! Field values are the raw input text. A validator looks at that text and either
//! passes or yields one [`ValidationError`].

use std::fmt;
use std::rc::Rc;

/// Which kind of validator produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Required,
    Email,
    Integer,
    Pattern,
}

/// One failed validator on one field. Read by the view, never returned as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub rule: Rule,
    pub message: String,
}

pub type Predicate = Rc<dyn Fn(&str) -> bool>;

#[derive(Clone)]
pub enum Validator {
    /// Fails on empty (or whitespace-only) input.
    Required { message: String },
    /// Fails on non-empty input the predicate rejects. Empty input always passes, so an
    /// optional field is only checked once the user types something.
    Pattern {
        rule: Rule,
        predicate: Predicate,
        message: String,
    },
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Required { message } => {
                f.debug_struct("Required").field("message", message).finish()
            }
            Validator::Pattern { rule, message, .. } => f
                .debug_struct("Pattern")
                .field("rule", rule)
                .field("message", message)
                .finish(),
        }
    }
}

impl Validator {
    pub fn required(message: impl Into<String>) -> Self {
        Validator::Required {
            message: message.into(),
        }
    }

    pub fn pattern(
        rule: Rule,
        predicate: impl Fn(&str) -> bool + 'static,
        message: impl Into<String>,
    ) -> Self {
        Validator::Pattern {
            rule,
            predicate: Rc::new(predicate),
            message: message.into(),
        }
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::pattern(Rule::Email, is_email, message)
    }

    pub fn integer(message: impl Into<String>) -> Self {
        Self::pattern(Rule::Integer, is_integer, message)
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Validator::Required { .. })
    }

    pub fn check(&self, value: &str) -> Option<ValidationError> {
        match self {
            Validator::Required { message } if value.trim().is_empty() => Some(ValidationError {
                rule: Rule::Required,
                message: message.clone(),
            }),
            Validator::Pattern {
                rule,
                predicate,
                message,
            } if !value.is_empty() && !predicate(value) => Some(ValidationError {
                rule: *rule,
                message: message.clone(),
            }),
            _ => None,
        }
    }
}

/// `local@domain`, where the domain is dot-separated labels of letters, digits and
/// hyphens. A top-level domain is not required.
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local.len() <= 64
        && !local.starts_with('.')
        && !local.ends_with('.')
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~.-".contains(c));
    let domain_ok = !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    local_ok && domain_ok
}

/// A non-negative whole number, as typed into a numeric input.
pub fn is_integer(value: &str) -> bool {
    value.trim().parse::<u32>().is_ok()
}
