//! Ports for the audit log.

pub mod outbound;

pub use outbound::AuditSink;
