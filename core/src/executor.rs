//! The Request Executor: one HTTP call in, one normalized outcome out.
//!
//! # Design
//! Each call is split the same way the rest of the crate is: a pure
//! `build_request` that produces an `HttpRequest`, a `Transport` round-trip,
//! and a `parse_response` that turns the `HttpResponse` into either the
//! decoded JSON body or an `ApiError`. No retries, caching, or
//! deduplication happen here; two identical calls are two requests.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Error};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::payload::{Payload, JSON_CONTENT_TYPE};
use crate::session::AuthExpiredListener;
use crate::transport::Transport;

pub struct RequestExecutor<T> {
    transport: T,
    auth_listener: Option<Arc<dyn AuthExpiredListener>>,
}

impl<T: Transport> RequestExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            auth_listener: None,
        }
    }

    /// Register the listener told about 401 responses.
    pub fn with_auth_listener(mut self, listener: Arc<dyn AuthExpiredListener>) -> Self {
        self.auth_listener = Some(listener);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the wire request.
    ///
    /// `authorization` is always sent: `Bearer <token>`, or `Bearer ` with
    /// nothing after it when there is no token. `content-type` is the
    /// multipart kind for form payloads and `application/json` otherwise.
    pub fn build_request(
        url: &str,
        method: HttpMethod,
        payload: Option<&Payload>,
        token: Option<&str>,
    ) -> Result<HttpRequest, Error> {
        let content_type = payload
            .map(Payload::content_type)
            .unwrap_or_else(|| JSON_CONTENT_TYPE.to_string());
        let body = payload.map(Payload::encode).transpose()?;

        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers: vec![
                (
                    "authorization".to_string(),
                    format!("Bearer {}", token.unwrap_or_default()),
                ),
                ("content-type".to_string(), content_type),
            ],
            body,
        })
    }

    /// Perform one call and return the decoded response body.
    ///
    /// An empty 2xx body decodes to `Value::Null`.
    pub fn execute(
        &self,
        url: &str,
        method: HttpMethod,
        payload: Option<&Payload>,
        token: Option<&str>,
    ) -> Result<Value, Error> {
        let request = Self::build_request(url, method, payload, token)?;
        tracing::debug!(%method, url, "dispatching request");

        let response = match self.transport.send(&request) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%method, url, "no response: {e}");
                return Err(ApiError::transport().into());
            }
        };

        self.parse_response(response)
    }

    /// Like `execute`, but takes the verb as a string. Unsupported verbs fail
    /// before the transport is touched.
    pub fn execute_raw(
        &self,
        url: &str,
        method: &str,
        payload: Option<&Payload>,
        token: Option<&str>,
    ) -> Result<Value, Error> {
        let method: HttpMethod = method.parse()?;
        self.execute(url, method, payload, token)
    }

    /// Like `execute`, but deserializes the body into `R`.
    pub fn execute_as<R: DeserializeOwned>(
        &self,
        url: &str,
        method: HttpMethod,
        payload: Option<&Payload>,
        token: Option<&str>,
    ) -> Result<R, Error> {
        let value = self.execute(url, method, payload, token)?;
        serde_json::from_value(value).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Normalize a response that the server completed.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, Error> {
        if response.is_success() {
            if response.body.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&response.body).map_err(|e| Error::Decode(e.to_string()));
        }

        let error = ApiError::from_response(&response);
        if error.is_auth_expired() {
            tracing::warn!("server rejected the bearer token");
            if let Some(listener) = &self.auth_listener {
                listener.on_auth_expired();
            }
        }
        Err(error.into())
    }
}
