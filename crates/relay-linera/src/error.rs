/// Errors from the remote ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineraError {
    /// No application endpoint could be resolved; no request was sent.
    #[error("linera application endpoint is not configured")]
    NotConfigured,

    #[error("linera responded with HTTP {status}")]
    Http { status: u16 },

    /// The response carried a non-empty `errors` list.
    #[error("graphql error: {}", .0.join("; "))]
    Graphql(Vec<String>),

    /// The request never produced a response (connect, TLS, body read).
    #[error("request failed: {0}")]
    Request(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// `appendEvent` did not return `true`.
    #[error("linera rejected the append")]
    AppendRejected,

    /// `updateEventStatus` did not return `true`.
    #[error("linera rejected the status update")]
    UpdateRejected,

    /// The string inside `data.events` is not a valid page.
    #[error("invalid events json: {0}")]
    InvalidJson(String),
}

impl LineraError {
    /// Stable tag used in logs and error payloads.
    pub fn code(&self) -> String {
        match self {
            Self::NotConfigured => "linera_not_configured".into(),
            Self::Http { status } => format!("http_{status}"),
            Self::Graphql(_) => "graphql_error".into(),
            Self::Request(_) => "request_failed".into(),
            Self::InvalidResponse(_) => "invalid_response".into(),
            Self::AppendRejected => "append_failed".into(),
            Self::UpdateRejected => "update_failed".into(),
            Self::InvalidJson(_) => "invalid_json".into(),
        }
    }
}

impl From<reqwest::Error> for LineraError {
    fn from(err: reqwest::Error) -> Self {
        LineraError::Request(err.to_string())
    }
}

pub type LineraResult<T> = Result<T, LineraError>;
