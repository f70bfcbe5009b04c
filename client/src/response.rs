use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::FallbackMessage;
use crate::error::{ErrorCause, ErrorResult, TransportError};
use crate::transport::HttpResponse;

/// Shape of a non-2xx response body
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorBody {
    /// Object carrying both `cause` and `message`, as the service formats its own errors
    Structured { cause: String, message: String },
    /// Bare text, a JSON string, or an object with only a `message`
    Message(String),
    /// No usable text (blank, null, or an object lacking a message)
    Empty,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return ErrorBody::Empty;
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(map)) => {
                let cause = map.get("cause").and_then(Value::as_str);
                let message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.trim().is_empty());
                match (cause, message) {
                    (Some(cause), Some(message)) => ErrorBody::Structured {
                        cause: cause.to_string(),
                        message: message.to_string(),
                    },
                    (None, Some(message)) => ErrorBody::Message(message.to_string()),
                    _ => ErrorBody::Empty,
                }
            }
            Ok(Value::String(text)) if text.trim().is_empty() => ErrorBody::Empty,
            Ok(Value::String(text)) => ErrorBody::Message(text),
            Ok(Value::Null) => ErrorBody::Empty,
            _ => ErrorBody::Message(trimmed.to_string()),
        }
    }
}

/// Cause assigned from the status code alone, used whenever the body does not
/// carry a structured client error.
pub fn cause_for_status(status: StatusCode) -> ErrorCause {
    match status.as_u16() {
        400 => ErrorCause::BadRequest,
        401 => ErrorCause::InvalidParameters,
        404 => ErrorCause::ResourceNotFound,
        402..=499 => ErrorCause::BadRequest,
        _ => ErrorCause::UnexpectedServerError,
    }
}

/// Turns transport outcomes into either the decoded success payload or an [`ErrorResult`]
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseNormalizer {
    fallback: FallbackMessage,
}

impl ResponseNormalizer {
    pub fn new(fallback: FallbackMessage) -> Self {
        Self { fallback }
    }

    pub fn normalize<T: DeserializeOwned>(
        &self,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Result<T, ErrorResult> {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                warn!("Request failed before a response arrived: {}", e);
                return Err(ErrorResult::new(
                    ErrorCause::UnexpectedServerError,
                    e.to_string(),
                ));
            }
        };

        if response.status.is_success() {
            return serde_json::from_str(&response.body).map_err(|e| {
                warn!("Undecodable {} payload: {}", response.status, e);
                ErrorResult::new(
                    ErrorCause::UnexpectedServerError,
                    format!("Malformed response payload: {}", e),
                )
            });
        }

        let error = self.error_for(response.status, ErrorBody::parse(&response.body));
        warn!("Server answered {}: {}", response.status, error);
        Err(error)
    }

    pub fn error_for(&self, status: StatusCode, body: ErrorBody) -> ErrorResult {
        let cause = cause_for_status(status);
        debug!("Mapping {} with {:?} body", status, body);

        match body {
            ErrorBody::Structured { cause: tag, message } if status.is_client_error() => {
                ErrorResult::new(ErrorCause::from(tag), message)
            }
            ErrorBody::Structured { message, .. } | ErrorBody::Message(message) => {
                ErrorResult::new(cause, message)
            }
            ErrorBody::Empty => {
                let message = self.fallback_message(&cause, status);
                ErrorResult::new(cause, message)
            }
        }
    }

    fn fallback_message(&self, cause: &ErrorCause, status: StatusCode) -> String {
        match self.fallback {
            FallbackMessage::StatusText => status
                .canonical_reason()
                .unwrap_or_else(|| cause.generic_message())
                .to_string(),
            FallbackMessage::Generic => cause.generic_message().to_string(),
        }
    }
}
