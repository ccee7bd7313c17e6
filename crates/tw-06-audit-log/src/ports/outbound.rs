//! Outbound Ports (Driven Ports)

use crate::domain::AuditError;

/// Durable destination for audit lines.
///
/// Implementations must write each line atomically with respect to other
/// callers: one line in, one complete line out, never interleaved.
pub trait AuditSink: Send + Sync {
    /// Append one line. The sink adds the line terminator.
    fn append(&self, line: &str) -> Result<(), AuditError>;
}
