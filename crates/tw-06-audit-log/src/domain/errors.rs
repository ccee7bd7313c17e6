use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Audit sink I/O error: {0}")]
    Io(#[from] std::io::Error),
}
