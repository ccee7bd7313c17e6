//! # Audit Log
//!
//! **Component:** 6
//!
//! ## Purpose
//!
//! The persisted, append-only record of every wipe request transition.
//! Separate from `tracing` output, which is operational and may be
//! discarded.
//!
//! ## Line format
//!
//! ```text
//! [2025-01-01T12:00:00.000Z] [INFO] Request validated | Data: {"device":"/dev/sdz",...}
//! ```
//!
//! The `| Data:` suffix appears only when the entry has a payload.
//!
//! ## Redaction
//!
//! Applied before an entry exists, to both message and payload. Object keys
//! containing `password` or `secret` (any case, any depth) and inline
//! `password=...` / `secret: ...` / `"password":"..."` shapes are masked
//! with `***`.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FileSink, MemorySink};
pub use domain::{AuditConfig, AuditError, LogEntry, LogLevel, Redactor, REDACTED};
pub use ports::AuditSink;
pub use service::AuditLog;
