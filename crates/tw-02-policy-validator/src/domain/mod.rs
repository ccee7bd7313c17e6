//! Validation domain: rule definitions, field sets, path safety.

pub mod errors;
pub mod fields;
pub mod rules;
pub mod safe_path;

pub use errors::ValidationError;
pub use fields::{FieldKind, ValidatedFields, WipeFields};
pub use rules::{FieldRule, ValidationConfig};
pub use safe_path::is_safe_path;
