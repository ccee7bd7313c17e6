//! Audit Log Service
//!
//! Redacts, formats and appends. Never fails the caller: sink errors go to
//! `tracing::error!` and are dropped.
//!
//! Async callers use [`AuditLog::record_async`], which hands the sink write
//! to tokio's blocking pool.

use serde_json::Value;
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::error;

use crate::adapters::FileSink;
use crate::domain::{AuditConfig, AuditError, LogEntry, LogLevel, Redactor};
use crate::ports::AuditSink;

pub struct AuditLog {
    sink: Arc<dyn AuditSink>,
    redactor: Redactor,
    min_level: LogLevel,
    write_failures: AtomicU64,
}

impl AuditLog {
    pub fn new(sink: Arc<dyn AuditSink>, min_level: LogLevel) -> Self {
        Self {
            sink,
            redactor: Redactor::new(),
            min_level,
            write_failures: AtomicU64::new(0),
        }
    }

    /// Audit log writing to the configured file.
    pub fn from_config(config: &AuditConfig) -> Result<Self, AuditError> {
        let sink = FileSink::open(&config.file)?;
        Ok(Self::new(Arc::new(sink), config.min_level))
    }

    /// Record one entry. Returns the entry as written, or `None` when it was
    /// below the minimum level.
    pub fn record(&self, level: LogLevel, message: &str, payload: Option<Value>) -> Option<LogEntry> {
        if level < self.min_level {
            return None;
        }

        let entry = LogEntry::redacted(&self.redactor, level, message, payload);
        if let Err(e) = self.sink.append(&entry.to_line()) {
            self.write_failed(level, &e);
        }
        Some(entry)
    }

    /// [`record`](Self::record) without blocking the calling runtime worker.
    /// Resolves once the line has reached the sink.
    pub async fn record_async(
        &self,
        level: LogLevel,
        message: &str,
        payload: Option<Value>,
    ) -> Option<LogEntry> {
        if level < self.min_level {
            return None;
        }

        let entry = LogEntry::redacted(&self.redactor, level, message, payload);
        let sink = Arc::clone(&self.sink);
        let line = entry.to_line();
        match tokio::task::spawn_blocking(move || sink.append(&line)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => self.write_failed(level, &e),
            Err(e) => self.write_failed(level, &e),
        }
        Some(entry)
    }

    fn write_failed(&self, level: LogLevel, e: &dyn Display) {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
        error!(error = %e, level = %level, "Audit write failed");
    }

    pub fn info(&self, message: &str, payload: Option<Value>) -> Option<LogEntry> {
        self.record(LogLevel::Info, message, payload)
    }

    pub fn warn(&self, message: &str, payload: Option<Value>) -> Option<LogEntry> {
        self.record(LogLevel::Warn, message, payload)
    }

    pub fn error(&self, message: &str, payload: Option<Value>) -> Option<LogEntry> {
        self.record(LogLevel::Error, message, payload)
    }

    /// Sink failures swallowed so far.
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }
}
