//! Audit entries and their line format.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use super::level::LogLevel;
use super::redact::Redactor;

/// One audit record. Only constructible through [`LogEntry::redacted`], so
/// an entry never holds an unredacted message or payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    timestamp: DateTime<Utc>,
    level: LogLevel,
    message: String,
    payload: Option<Value>,
}

impl LogEntry {
    pub fn redacted(
        redactor: &Redactor,
        level: LogLevel,
        message: &str,
        payload: Option<Value>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: redactor.redact_text(message).into_owned(),
            payload: payload.map(|p| redactor.redact_value(p)),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// `[2025-01-01T00:00:00.000Z] [INFO] message | Data: {...}`
    ///
    /// Newlines inside the message are escaped so one entry is one line.
    pub fn to_line(&self) -> String {
        let message = self.message.replace('\r', "\\r").replace('\n', "\\n");
        let mut line = format!(
            "[{}] [{}] {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.level,
            message
        );
        if let Some(payload) = &self.payload {
            line.push_str(" | Data: ");
            line.push_str(&payload.to_string());
        }
        line
    }
}
