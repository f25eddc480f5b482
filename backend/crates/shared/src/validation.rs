//! Field-level validation errors
//!
//! Carrier for reporting every violated field of a form-like input at
//! once, so clients can render all problems together instead of
//! discovering them one round trip at a time.
//!
//! Structural problems (shape, length) and uniqueness conflicts
//! ("already taken") are distinguished by [`FieldErrorKind`] because
//! clients react to them differently.

use serde::Serialize;
use std::fmt;

/// What kind of problem a field has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldErrorKind {
    /// Structurally invalid (shape, length, mismatch).
    Invalid,
    /// Value is valid but already in use by another record.
    Taken,
}

/// A single violated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Input field name as the client knows it (camelCase).
    pub field: &'static str,
    pub kind: FieldErrorKind,
    pub message: String,
}

/// Ordered collection of field errors.
///
/// Empty means "valid". Use [`ValidationErrors::into_result`] to turn an
/// accumulation pass into a `Result`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a structural violation.
    pub fn add_invalid(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            kind: FieldErrorKind::Invalid,
            message: message.into(),
        });
    }

    /// Record a uniqueness conflict.
    pub fn add_taken(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            kind: FieldErrorKind::Taken,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether any error concerns the given field.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Whether every recorded error is a uniqueness conflict.
    pub fn all_taken(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|e| e.kind == FieldErrorKind::Taken)
    }

    /// `Ok(value)` when empty, `Err(self)` otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
            first = false;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_ok() {
        let errors = ValidationErrors::new();
        assert!(errors.is_empty());
        assert_eq!(errors.into_result(1), Ok(1));
    }

    #[test]
    fn test_collects_all_fields() {
        let mut errors = ValidationErrors::new();
        errors.add_invalid("username", "Too short");
        errors.add_invalid("password", "Too short");
        errors.add_taken("email", "Email already taken");

        assert_eq!(errors.len(), 3);
        assert!(errors.has_field("username"));
        assert!(errors.has_field("email"));
        assert!(!errors.has_field("title"));
        assert!(!errors.all_taken());
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn test_all_taken() {
        let mut errors = ValidationErrors::new();
        errors.add_taken("username", "Username already taken");
        errors.add_taken("email", "Email already taken");
        assert!(errors.all_taken());

        let empty = ValidationErrors::new();
        assert!(!empty.all_taken());
    }

    #[test]
    fn test_serialize_shape() {
        let mut errors = ValidationErrors::new();
        errors.add_taken("email", "Email already taken");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json[0]["field"], "email");
        assert_eq!(json[0]["kind"], "taken");
    }
}
