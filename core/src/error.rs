//! Error types for the admin API client.
//!
//! # Design
//! Every failed HTTP call, whether the server answered with a non-2xx status
//! or never answered at all, surfaces as the same `ApiError` shape. Callers
//! tell the two apart only by `status_code`: transport failures carry none.
//! Programmer faults (unsupported verb, unencodable payload) and schema
//! mismatches on success bodies get their own `Error` variants so they are
//! never confused with something the server said.

use serde_json::Value;

use crate::http::HttpResponse;

/// Fallback `message` when the server rejected a request without one.
pub const SERVER_FALLBACK_MESSAGE: &str = "Something Went wrong";

/// `status_text` used when no response was received.
pub const TRANSPORT_STATUS_TEXT: &str = "Network or server error occurred";

/// `message` used when no response was received.
pub const TRANSPORT_MESSAGE: &str = "Something went wrong";

/// Normalized error for any failed round-trip.
///
/// `message` is never empty.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// Error body returned by the server, if any. Non-JSON bodies are kept
    /// as a JSON string.
    pub payload: Option<Value>,
    pub status_text: String,
    pub message: String,
    pub status_code: Option<u16>,
}

impl ApiError {
    /// Build the error for a response the server completed with a non-2xx
    /// status.
    pub fn from_response(response: &HttpResponse) -> Self {
        let payload = if response.body.trim().is_empty() {
            None
        } else {
            Some(
                serde_json::from_str(&response.body)
                    .unwrap_or_else(|_| Value::String(response.body.clone())),
            )
        };

        let status_text = payload
            .as_ref()
            .and_then(|p| non_empty_str(p, "status"))
            .map(str::to_string)
            .unwrap_or_else(|| response.status_text.clone());

        let message = payload
            .as_ref()
            .and_then(|p| non_empty_str(p, "message"))
            .unwrap_or(SERVER_FALLBACK_MESSAGE)
            .to_string();

        Self {
            payload,
            status_text,
            message,
            status_code: Some(response.status),
        }
    }

    /// Build the error for a request that never got a response.
    pub fn transport() -> Self {
        Self {
            payload: None,
            status_text: TRANSPORT_STATUS_TEXT.to_string(),
            message: TRANSPORT_MESSAGE.to_string(),
            status_code: None,
        }
    }

    /// True when the server reported the bearer token as no longer valid.
    pub fn is_auth_expired(&self) -> bool {
        self.status_code == Some(401)
    }

    pub fn is_transport(&self) -> bool {
        self.status_code.is_none()
    }
}

fn non_empty_str<'a>(payload: &'a Value, field: &str) -> Option<&'a str> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Errors returned by the executor and every query/mutation function.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The round-trip failed; see `ApiError`.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The verb is not one of GET, POST, PUT, DELETE. Raised before any I/O.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// The request payload could not be serialized.
    #[error("request payload could not be encoded: {0}")]
    Encode(String),

    /// A 2xx body was not valid JSON or did not match the expected type.
    #[error("response body could not be decoded: {0}")]
    Decode(String),
}

impl Error {
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }
}
