//! Policy Validator Service
//!
//! Compiles the configured rules once and checks request fields against
//! them in a fixed order: drive, method, username, password.

use regex::Regex;
use shared_types::WipeMethod;
use tracing::debug;

use crate::domain::{
    is_safe_path, FieldKind, FieldRule, ValidatedFields, ValidationConfig, ValidationError,
    WipeFields,
};

#[derive(Debug, Clone)]
struct CompiledRule {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
}

impl CompiledRule {
    fn compile(field: FieldKind, rule: &FieldRule) -> Result<Self, ValidationError> {
        let pattern = rule
            .pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|e| ValidationError::InvalidPattern {
                field,
                reason: e.to_string(),
            })?;

        Ok(Self {
            min_length: rule.min_length,
            max_length: rule.max_length,
            pattern,
        })
    }

    fn check(&self, field: FieldKind, value: &str) -> Result<(), ValidationError> {
        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(ValidationError::TooShort { field, min });
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err(ValidationError::TooLong { field, max });
            }
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(value) {
                return Err(ValidationError::PatternMismatch(field));
            }
        }
        Ok(())
    }
}

/// Validates wipe request fields against configured rules.
#[derive(Debug, Clone)]
pub struct PolicyValidator {
    drive: Option<CompiledRule>,
    username: Option<CompiledRule>,
    password: Option<CompiledRule>,
}

impl PolicyValidator {
    /// Compile `config`.
    ///
    /// # Errors
    /// - `InvalidPattern`: a configured regular expression does not compile
    pub fn new(config: &ValidationConfig) -> Result<Self, ValidationError> {
        let compile = |field, rule: &Option<FieldRule>| {
            rule.as_ref()
                .map(|r| CompiledRule::compile(field, r))
                .transpose()
        };

        Ok(Self {
            drive: compile(FieldKind::Drive, &config.drive)?,
            username: compile(FieldKind::Username, &config.username)?,
            password: compile(FieldKind::Password, &config.password)?,
        })
    }

    fn rule(&self, field: FieldKind) -> Option<&CompiledRule> {
        match field {
            FieldKind::Drive => self.drive.as_ref(),
            FieldKind::Username => self.username.as_ref(),
            FieldKind::Password => self.password.as_ref(),
        }
    }

    /// Check one ruled field.
    pub fn validate_field(
        &self,
        field: FieldKind,
        value: Option<&str>,
    ) -> Result<(), ValidationError> {
        let rule = self
            .rule(field)
            .ok_or(ValidationError::MissingRule(field))?;
        let value = value
            .filter(|v| !v.is_empty())
            .ok_or(ValidationError::Missing(field))?;
        rule.check(field, value)
    }

    /// Structural method check: exactly `sanitize` or `overwrite`.
    pub fn validate_method(method: Option<&str>) -> Result<WipeMethod, ValidationError> {
        let method = method.unwrap_or_default();
        method
            .parse::<WipeMethod>()
            .map_err(|e| ValidationError::UnknownMethod(e.0))
    }

    /// Validate a whole request. Stops at the first failing field.
    pub fn validate<'a>(
        &self,
        fields: &WipeFields<'a>,
    ) -> Result<ValidatedFields<'a>, ValidationError> {
        self.validate_field(FieldKind::Drive, fields.get(FieldKind::Drive))?;
        let drive = fields.get(FieldKind::Drive).unwrap_or_default();
        if !is_safe_path(drive) {
            return Err(ValidationError::UnsafePath(drive.to_string()));
        }

        let method = Self::validate_method(fields.method)?;

        self.validate_field(FieldKind::Username, fields.get(FieldKind::Username))?;
        self.validate_field(FieldKind::Password, fields.get(FieldKind::Password))?;

        let username = fields.get(FieldKind::Username).unwrap_or_default();
        debug!(drive = %drive, method = %method, username = %username, "Request fields valid");

        Ok(ValidatedFields {
            drive,
            method,
            username,
        })
    }
}
