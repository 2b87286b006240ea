//! Error types and Result alias for the SweeperKeeper client

use thiserror::Error;

/// Main error type for the SweeperKeeper client
#[derive(Error, Debug)]
pub enum Error {
    /// The server answered with a non-success status. `body` is the
    /// response payload as the server sent it.
    #[error("API request failed with status {status}: {body}")]
    ApiError {
        status: u16,
        body: serde_json::Value,
    },

    /// No response was received (connect failure, timeout, reset)
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Not logged in")]
    NotAuthenticated,
}

impl Error {
    /// Server payload attached to the error, if a response was received
    pub fn response_body(&self) -> Option<&serde_json::Value> {
        match self {
            Error::ApiError { body, .. } => Some(body),
            _ => None,
        }
    }

    /// True when the transport never got a response
    pub fn is_network(&self) -> bool {
        matches!(self, Error::NetworkError(_))
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::NetworkError(format!("request timed out: {}", err))
        } else {
            Error::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}
