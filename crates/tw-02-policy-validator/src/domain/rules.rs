//! Field rule configuration.

use serde::{Deserialize, Serialize};

/// Length and pattern constraints for one field. Lengths count characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Unanchored regular expression; anchor it explicitly when needed.
    #[serde(default)]
    pub pattern: Option<String>,
}

impl FieldRule {
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length: Some(min_length),
            max_length: Some(max_length),
            pattern: None,
        }
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

/// Rules keyed by field.
///
/// No container-level `#[serde(default)]`: a `[validation]`
/// table that omits a field leaves that rule `None`, and a field without a
/// rule fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub drive: Option<FieldRule>,
    pub username: Option<FieldRule>,
    pub password: Option<FieldRule>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            drive: Some(
                FieldRule::new(1, 260)
                    .with_pattern(r"^(/dev/[A-Za-z0-9/_.-]+|\\\\\.\\PhysicalDrive[0-9]+)$"),
            ),
            username: Some(FieldRule::new(3, 32).with_pattern(r"^[A-Za-z0-9_.-]+$")),
            password: Some(FieldRule::new(8, 128)),
        }
    }
}
