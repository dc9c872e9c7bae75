use thiserror::Error;

/// Classified failure of a single call to the records service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// No response: timeout, DNS failure, refused connection, broken body.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("HTTP {status} {reason}")]
    Status { status: u16, reason: String },

    /// 2xx response without the payload the operation requires.
    #[error("Response body was empty")]
    EmptyBody,

    /// 2xx response whose payload is not a valid record shape.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl RemoteError {
    /// HTTP status code, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RemoteError::Transport(e) if e.is_timeout())
    }
}
