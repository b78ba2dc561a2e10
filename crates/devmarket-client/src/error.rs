use thiserror::Error;

/// Every failure the client surfaces: transport errors, non-success HTTP
/// statuses, malformed response bodies, and WebSocket failures all collapse
/// into one error whose Display is the human-readable message shown to the
/// user. No variant is retried; every failure is scoped to the page that
/// triggered it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status. `message` is the backend's `detail` field
    /// when the error body parses, otherwise `API error: <status>`.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("websocket: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

impl ApiError {
    /// HTTP status code, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
