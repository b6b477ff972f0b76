//! Error types for the CryptoCompare client

use thiserror::Error;

/// Error signalled by the API inside an otherwise successful response body
///
/// Carries the body's `Message` field when one was present. Every classified
/// error is terminal for the call that received it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .message.as_deref().unwrap_or("CryptoCompare API returned an error"))]
pub struct ApiError {
    /// Human-readable message taken from the response body
    pub message: Option<String>,
}

impl ApiError {
    /// Creates an ApiError with an optional message
    pub fn new(message: Option<String>) -> Self {
        Self { message }
    }

    /// Creates an ApiError with a message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Returns the message, if the API supplied one
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Errors returned by client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// The response body carried an error envelope
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Network request failed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Body could not be decoded or lacks the documented field
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Arguments were rejected before any request was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Creates an InvalidResponse error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Creates an InvalidRequest error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Returns the classified API error, if this is one
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// True when the error came from the response envelope rather than the
    /// transport, decoding, or argument checks
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(format!("Failed to decode JSON: {}", err))
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
