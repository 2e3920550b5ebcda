use shared::EnvelopeError;
use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("request failed with status {status}: {message}")]
    Client { status: u16, message: String },
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
    /// The backend answered 2xx but with `success: false`
    #[error("{0}")]
    Rejected(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Map a non-2xx status to an error, surfacing the backend's own message
    /// for client errors
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = shared::Envelope::error_text(body);
        if (400..500).contains(&status) {
            ApiError::Client {
                status,
                message: message.unwrap_or_else(|| format!("Request failed ({})", status)),
            }
        } else {
            ApiError::Server {
                status,
                message: message.unwrap_or_else(|| "Internal server error".to_string()),
            }
        }
    }

    /// Text suitable for an alert
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Cannot reach the server. Check that the backend is running.".to_string()
            }
            ApiError::Timeout => "The server took too long to respond. Please try again.".to_string(),
            ApiError::Malformed(_) => "The server sent an unexpected response.".to_string(),
            ApiError::Client { message, .. } => message.clone(),
            ApiError::Server { .. } => "The server encountered an error. Please try again later.".to_string(),
            ApiError::Rejected(message) => message.clone(),
            ApiError::Encode(_) => "Could not send the request.".to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Client { status: 404, .. })
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => ApiError::Timeout,
            TransportError::Network(msg) => ApiError::Network(msg),
        }
    }
}

impl From<EnvelopeError> for ApiError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Malformed(msg) => ApiError::Malformed(msg),
            EnvelopeError::Rejected(msg) => ApiError::Rejected(msg),
        }
    }
}
