use std::fmt;

/// Errors that can occur while talking to the upstream read API.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Connection-level failure (DNS, refused, reset).
    Network(String),
    /// Upstream answered with a non-success status.
    Api { status: u16, message: String },
    /// Upstream answered `null` for the requested entity.
    NotFound { kind: &'static str, id: String },
    /// Body was not the JSON shape we expected.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::NotFound { kind, id } => write!(f, "{kind} {id} not found"),
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}
