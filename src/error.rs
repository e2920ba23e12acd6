//! Error taxonomy for the access layer
//!
//! Every failure a caller can observe is one of:
//! - validation: rejected locally before any network attempt
//! - transport: the request never completed (DNS, connect, timeout)
//! - server: a non-2xx response carrying a structured message
//! - decode: a 2xx response whose body did not match the expected shape

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected locally, no network attempt was made.
    #[error("{0}")]
    Validation(String),

    /// The request never reached the server or got no response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response, message extracted from the error envelope.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 2xx response with an unexpected body shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local credential storage failed.
    #[error("credential storage failed: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        ApiError::Server {
            status,
            message: message.into(),
        }
    }

    /// True when the call was rejected before any network attempt.
    pub fn is_local(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
