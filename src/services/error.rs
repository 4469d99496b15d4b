//! Errors raised by HTTP-backed providers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Non-success status with the response body.
    #[error("HTTP error: {status} - {body}")]
    Http { status: u16, body: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Request error: {0}")]
    Request(String),
}

impl ServiceError {
    /// Timeouts, connection failures, rate limiting and server errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Timeout | ServiceError::Connection(_) => true,
            ServiceError::Http { status, .. } => *status == 429 || *status >= 500,
            ServiceError::Decode(_) | ServiceError::Request(_) => false,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout
        } else if err.is_connect() {
            ServiceError::Connection(err.to_string())
        } else if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ServiceError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            ServiceError::Request(err.to_string())
        }
    }
}

/// Turn a non-2xx response into `ServiceError::Http`, keeping the body for logs.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::Http {
        status: status.as_u16(),
        body,
    })
}
