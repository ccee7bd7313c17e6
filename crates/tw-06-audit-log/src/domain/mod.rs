//! Audit domain: levels, entries, redaction.

pub mod config;
pub mod entry;
pub mod errors;
pub mod level;
pub mod redact;

pub use config::AuditConfig;
pub use entry::LogEntry;
pub use errors::AuditError;
pub use level::LogLevel;
pub use redact::{Redactor, REDACTED};
