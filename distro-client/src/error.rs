//! Client error types

use serde_json::Value;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure (no response)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Request failed with status {status}: {message}")]
    Api {
        status: u16,
        message: String,
        /// Parsed JSON error body, when there was one
        body: Option<Value>,
    },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Form input rejected before any call was made
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Error replayed from the query cache
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Durable session storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status code of the failure, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Query(e) => e.status,
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Kind of a cached failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    Network,
    Status,
    Decode,
    Validation,
    Internal,
}

/// Failure stored in the cache and broadcast to subscribers.
///
/// Unlike [`ClientError`] this is plain data, so every subscriber gets a copy.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub status: Option<u16>,
    pub message: String,
    pub body: Option<Value>,
}

impl QueryError {
    pub fn new(kind: QueryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            body: None,
        }
    }

    pub fn decode(err: serde_json::Error) -> Self {
        Self::new(QueryErrorKind::Decode, err.to_string())
    }
}

impl From<&ClientError> for QueryError {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Api {
                status,
                message,
                body,
            } => Self {
                kind: QueryErrorKind::Status,
                status: Some(*status),
                message: message.clone(),
                body: body.clone(),
            },
            ClientError::Http(e) => Self {
                kind: QueryErrorKind::Network,
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
                body: None,
            },
            ClientError::Query(e) => e.clone(),
            ClientError::Validation(e) => Self::new(QueryErrorKind::Validation, e.to_string()),
            ClientError::InvalidResponse(msg) => Self::new(QueryErrorKind::Decode, msg.clone()),
            ClientError::Serialization(e) => Self::new(QueryErrorKind::Decode, e.to_string()),
            other => Self::new(QueryErrorKind::Internal, other.to_string()),
        }
    }
}
