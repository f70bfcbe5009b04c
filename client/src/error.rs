use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categorical tag of an [`ErrorResult`].
///
/// Causes reported by the server that fall outside the known taxonomy are
/// carried verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCause {
    InvalidParameters,
    GameOperationFailed,
    BadRequest,
    ResourceNotFound,
    UnexpectedServerError,
    Other(String),
}

impl ErrorCause {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCause::InvalidParameters => "Invalid Parameters",
            ErrorCause::GameOperationFailed => "GameOperationFailed",
            ErrorCause::BadRequest => "Bad Request",
            ErrorCause::ResourceNotFound => "Resource Not Found",
            ErrorCause::UnexpectedServerError => "Unexpected Server Error",
            ErrorCause::Other(tag) => tag,
        }
    }

    /// Message used when the response carries no usable text
    pub fn generic_message(&self) -> &'static str {
        match self {
            ErrorCause::InvalidParameters => "The request parameters were rejected by the server",
            ErrorCause::GameOperationFailed => "The game operation could not be completed",
            ErrorCause::BadRequest => "The request could not be processed by the server",
            ErrorCause::ResourceNotFound => "The requested resource does not exist",
            ErrorCause::UnexpectedServerError | ErrorCause::Other(_) => {
                "The server failed to process the request"
            }
        }
    }
}

impl From<String> for ErrorCause {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Invalid Parameters" => ErrorCause::InvalidParameters,
            "GameOperationFailed" => ErrorCause::GameOperationFailed,
            "Bad Request" => ErrorCause::BadRequest,
            "Resource Not Found" => ErrorCause::ResourceNotFound,
            "Unexpected Server Error" => ErrorCause::UnexpectedServerError,
            _ => ErrorCause::Other(value),
        }
    }
}

impl From<ErrorCause> for String {
    fn from(value: ErrorCause) -> Self {
        match value {
            ErrorCause::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl PartialEq<&str> for ErrorCause {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub cause: ErrorCause,
    pub message: String,
}

/// Uniform failure shape of every game operation.
///
/// Serializes as `{"error": {"cause": ..., "message": ...}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub error: ErrorDetail,
}

impl ErrorResult {
    pub fn new(cause: ErrorCause, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                cause,
                message: message.into(),
            },
        }
    }

    pub fn cause(&self) -> &ErrorCause {
        &self.error.cause
    }

    pub fn message(&self) -> &str {
        &self.error.message
    }
}

impl fmt::Display for ErrorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error.cause, self.error.message)
    }
}

impl std::error::Error for ErrorResult {}

/// Failure to get any response back from the server
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors raised while building a client, before any request is sent
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build HTTP transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_result_wire_shape() {
        let error = ErrorResult::new(ErrorCause::ResourceNotFound, "gone");
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({ "error": { "cause": "Resource Not Found", "message": "gone" } })
        );
        assert_eq!(error.to_string(), "Resource Not Found: gone");
    }

    #[test]
    fn cause_tags_round_trip_through_strings() {
        for cause in [
            ErrorCause::InvalidParameters,
            ErrorCause::GameOperationFailed,
            ErrorCause::BadRequest,
            ErrorCause::ResourceNotFound,
            ErrorCause::UnexpectedServerError,
        ] {
            assert_eq!(ErrorCause::from(cause.as_str().to_string()), cause);
        }
        assert_eq!(
            ErrorCause::from("Conflict".to_string()),
            ErrorCause::Other("Conflict".to_string())
        );
    }
}
