/*
 * Responsibility
 * - Declarative request-body schemas (field, required?, kind)
 * - Built once at startup (AppState::new) and reused for every request
 * - Collects every field error so the client sees them all in one 400
 */
use serde_json::Value;

use crate::error::{AppError, FieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string, taken verbatim (whitespace counts). Used for secrets.
    NonEmpty,
    /// String with at least one non-whitespace character.
    NonEmptyText,
    /// String in `local@domain.tld` form.
    Email,
}

#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldRule {
    pub const fn required(field: &'static str, kind: FieldKind) -> Self {
        Self {
            field,
            required: true,
            kind,
        }
    }

    pub const fn optional(field: &'static str, kind: FieldKind) -> Self {
        Self {
            field,
            required: false,
            kind,
        }
    }

    fn check(&self, value: Option<&Value>) -> Option<FieldError> {
        let value = match value {
            None | Some(Value::Null) if self.required => {
                return Some(FieldError::new(self.field, format!("{} is required", self.field)));
            }
            None | Some(Value::Null) => return None,
            Some(value) => value,
        };

        let Value::String(s) = value else {
            return Some(FieldError::new(
                self.field,
                format!("{} must be a string", self.field),
            ));
        };

        match self.kind {
            FieldKind::NonEmpty if s.is_empty() => Some(FieldError::new(
                self.field,
                format!("{} must not be empty", self.field),
            )),
            FieldKind::NonEmpty => None,
            FieldKind::NonEmptyText if s.trim().is_empty() => Some(FieldError::new(
                self.field,
                format!("{} must not be empty", self.field),
            )),
            FieldKind::NonEmptyText => None,
            FieldKind::Email if !is_valid_email(s) => Some(FieldError::new(
                self.field,
                format!("{} must be a valid email address", self.field),
            )),
            FieldKind::Email => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

impl Schema {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    pub fn validate(&self, body: &Value) -> Result<(), AppError> {
        let Value::Object(map) = body else {
            return Err(AppError::validation(vec![FieldError::new(
                "body",
                "request body must be a JSON object",
            )]));
        };

        let errors: Vec<FieldError> = self
            .rules
            .iter()
            .filter_map(|rule| rule.check(map.get(rule.field)))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(errors))
        }
    }
}

/// Every body schema the petitioner routes use.
#[derive(Debug, Clone)]
pub struct Schemas {
    pub signin: Schema,
    pub profile_update: Schema,
}

impl Schemas {
    pub fn new() -> Self {
        Self {
            signin: Schema::new(vec![
                FieldRule::required("username", FieldKind::NonEmptyText),
                FieldRule::required("password", FieldKind::NonEmpty),
            ]),
            profile_update: Schema::new(vec![
                FieldRule::optional("name", FieldKind::NonEmptyText),
                FieldRule::optional("email", FieldKind::Email),
            ]),
        }
    }
}

impl Default for Schemas {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_valid_email(s: &str) -> bool {
    if s.len() > 254 || s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let label_ok = |label: &&str| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    let tld_ok = labels.last().is_some_and(|tld| tld.len() >= 2);

    labels.iter().all(label_ok) && tld_ok
}
