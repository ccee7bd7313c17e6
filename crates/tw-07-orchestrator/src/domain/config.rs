//! Engine configuration with validation.
//!
//! One section per subsystem. Every section defaults independently, so a
//! TOML file only needs the keys it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tw_02_policy_validator::ValidationConfig;
use tw_03_attempt_limiter::RateLimitConfig;
use tw_04_confirmation_gate::ConfirmationConfig;
use tw_05_erase_supervisor::SupervisorConfig;
use tw_06_audit_log::AuditConfig;

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Field rules for drive, username and password
    pub validation: ValidationConfig,
    /// Attempt limiting per requester
    pub rate_limit: RateLimitConfig,
    /// Executor selection and timeout
    pub supervisor: SupervisorConfig,
    /// Operator prompt
    pub confirmation: ConfirmationConfig,
    /// Persisted audit trail
    pub audit: AuditConfig,
    /// Application metadata
    pub app: AppConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            validation: ValidationConfig::default(),
            rate_limit: RateLimitConfig::default(),
            supervisor: SupervisorConfig::default(),
            confirmation: ConfirmationConfig::default(),
            audit: AuditConfig::default(),
            app: AppConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl EngineConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_limit.max_attempts == 0 {
            return Err(ConfigError::InvalidRateLimit(
                "max_attempts cannot be 0".into(),
            ));
        }
        if self.rate_limit.attempt_window_ms == 0 {
            return Err(ConfigError::InvalidRateLimit(
                "attempt_window_ms cannot be 0".into(),
            ));
        }

        if self.supervisor.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "supervisor.timeout_secs cannot be 0".into(),
            ));
        }
        if self.confirmation.prompt_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "confirmation.prompt_timeout_secs cannot be 0".into(),
            ));
        }

        let rules = [
            ("drive", &self.validation.drive),
            ("username", &self.validation.username),
            ("password", &self.validation.password),
        ];
        for (field, rule) in rules {
            let Some(rule) = rule else { continue };
            if let (Some(min), Some(max)) = (rule.min_length, rule.max_length) {
                if min > max {
                    return Err(ConfigError::InvalidRule(format!(
                        "{field}: min_length {min} exceeds max_length {max}"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid rate limiting configuration
    #[error("invalid rate limit: {0}")]
    InvalidRateLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Field rule that can never be satisfied
    #[error("invalid field rule: {0}")]
    InvalidRule(String),
}
