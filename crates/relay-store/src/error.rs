/// Errors from event store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// An event with the same id is already stored for this actor.
    #[error("event {id} already exists for actor {actor}")]
    EventExists { actor: String, id: String },

    /// No event with this id is stored for this actor.
    #[error("event {id} not found for actor {actor}")]
    NotFound { actor: String, id: String },

    /// The store cannot serve requests (poisoned lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Stable wire tag for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EventExists { .. } => "event_exists",
            Self::NotFound { .. } => "not_found",
            Self::Unavailable(_) => "store_unavailable",
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
