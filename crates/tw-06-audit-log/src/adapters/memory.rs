//! In-memory sink for tests.

use parking_lot::Mutex;

use crate::domain::AuditError;
use crate::ports::AuditSink;

#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl AuditSink for MemorySink {
    fn append(&self, line: &str) -> Result<(), AuditError> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}
