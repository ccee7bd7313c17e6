//! Validation errors.
//!
//! Messages never include the offending value: the password field goes
//! through the same paths as every other field.

use thiserror::Error;

use super::fields::FieldKind;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// No rule is configured for this field. Fail closed.
    #[error("No validation rule configured for {0}")]
    MissingRule(FieldKind),

    #[error("Missing required field: {0}")]
    Missing(FieldKind),

    #[error("Field {0} must be a string")]
    NotText(FieldKind),

    #[error("Field {field} is too short (minimum {min} characters)")]
    TooShort { field: FieldKind, min: usize },

    #[error("Field {field} is too long (maximum {max} characters)")]
    TooLong { field: FieldKind, max: usize },

    #[error("Field {0} has an invalid format")]
    PatternMismatch(FieldKind),

    /// A configured pattern does not compile.
    #[error("Invalid pattern for {field}: {reason}")]
    InvalidPattern { field: FieldKind, reason: String },

    #[error("Invalid wipe method: {0} (expected sanitize or overwrite)")]
    UnknownMethod(String),

    #[error("Refusing unsafe target path: {0}")]
    UnsafePath(String),
}
