use relay_store::StoreError;

/// Errors surfaced by the backend. Remote failures never appear here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BackendError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Store(err) => err.code(),
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;
