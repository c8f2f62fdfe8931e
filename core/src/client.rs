//! `AdminApi`: the query/mutation surface the back-office screens call.
//!
//! # Design
//! One method per backend operation, split across `queries` (reads) and
//! `mutations` (writes). Each method picks a URL from the address book,
//! shapes its payload as JSON or a multipart form, and makes exactly one
//! executor call. There is no sequencing of calls and no validation beyond
//! what the types enforce.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::endpoints::AddressBook;
use crate::error::Error;
use crate::executor::RequestExecutor;
use crate::http::HttpMethod;
use crate::payload::{MultipartForm, Payload};
use crate::session::AuthExpiredListener;
use crate::transport::{Transport, UreqTransport};

pub struct AdminApi<T> {
    endpoints: AddressBook,
    executor: RequestExecutor<T>,
}

impl AdminApi<UreqTransport> {
    /// Client over ureq, rooted at `config.api_root`.
    pub fn from_config(
        config: &ClientConfig,
        listener: Option<Arc<dyn AuthExpiredListener>>,
    ) -> Self {
        let mut executor = RequestExecutor::new(UreqTransport::new());
        if let Some(listener) = listener {
            executor = executor.with_auth_listener(listener);
        }
        Self::new(config.address_book(), executor)
    }
}

impl<T: Transport> AdminApi<T> {
    pub fn new(endpoints: AddressBook, executor: RequestExecutor<T>) -> Self {
        Self { endpoints, executor }
    }

    pub fn endpoints(&self) -> &AddressBook {
        &self.endpoints
    }

    pub fn executor(&self) -> &RequestExecutor<T> {
        &self.executor
    }

    pub(crate) fn get(&self, url: String, token: &str) -> Result<Value, Error> {
        self.executor.execute(&url, HttpMethod::Get, None, Some(token))
    }

    pub(crate) fn delete(&self, url: String, token: &str) -> Result<Value, Error> {
        self.executor.execute(&url, HttpMethod::Delete, None, Some(token))
    }

    pub(crate) fn send_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        url: String,
        body: &B,
        token: Option<&str>,
    ) -> Result<Value, Error> {
        let payload = Payload::json(body)?;
        self.executor.execute(&url, method, Some(&payload), token)
    }

    pub(crate) fn send_form(
        &self,
        method: HttpMethod,
        url: String,
        form: MultipartForm,
        token: &str,
    ) -> Result<Value, Error> {
        let payload = Payload::from(form);
        self.executor.execute(&url, method, Some(&payload), Some(token))
    }
}
