use thiserror::Error;

/// Errors produced by type conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown activity status: {0}")]
    UnknownStatus(String),

    #[error("unknown activity kind: {0}")]
    UnknownKind(String),
}
