//! Error types for the game API client.

use thiserror::Error;

/// Errors returned by [`GameApi`](super::GameApi) calls.
///
/// None of these are retried; every failure ends the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Input rejected before any request was made.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Transport failure or non-success HTTP status.
    #[error("Network error: {detail}")]
    Network { detail: String },

    /// Well-formed response with `success: false`.
    #[error("Remote error: {message}")]
    Remote { message: String },

    /// Response body did not match the expected envelope.
    #[error("Malformed response: {reason}")]
    MalformedResponse { reason: String },
}

impl ApiError {
    /// Text suitable for the status line.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::Network { .. } => "A network error occurred. Please try again.".to_string(),
            ApiError::Remote { message } => message.clone(),
            ApiError::MalformedResponse { .. } => {
                "The server sent an unexpected response.".to_string()
            }
        }
    }

    /// Get error type string for logging.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::Network { .. } => "network_error",
            ApiError::Remote { .. } => "remote_error",
            ApiError::MalformedResponse { .. } => "malformed_response",
        }
    }

    /// True when the server answered and rejected the request.
    pub fn is_remote(&self) -> bool {
        matches!(self, ApiError::Remote { .. })
    }
}
