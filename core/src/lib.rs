//! Client core for the solar retail and lending back-office API.
//!
//! # Overview
//! Every back-office screen talks to the remote REST service through
//! `AdminApi`, which turns each backend operation into one call on the
//! `RequestExecutor`. The executor attaches the bearer token, picks the
//! content type, performs the round-trip through a `Transport`, and
//! returns either the decoded JSON body or a normalized `ApiError`.
//!
//! # Design
//! - URLs come only from the `AddressBook`; call sites never build paths.
//! - Response bodies pass through as `serde_json::Value` except where a
//!   typed response is requested with `execute_as`.
//! - A 401 is reported to an `AuthExpiredListener` instead of being handled
//!   inside the executor. `SessionGuard` is the stock listener: it clears
//!   the stored token and redirects to the login route.
//! - The `Transport` trait is the only I/O seam, so tests script responses
//!   without a network.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod executor;
pub mod http;
mod mutations;
pub mod payload;
mod queries;
pub mod session;
pub mod transport;
pub mod types;

pub use client::AdminApi;
pub use config::ClientConfig;
pub use endpoints::AddressBook;
pub use error::{ApiError, Error};
pub use executor::RequestExecutor;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use payload::{FileAttachment, MultipartForm, Payload};
pub use session::{
    AuthExpiredListener, FileTokenStore, MemoryNavigator, MemoryTokenStore, Navigator,
    SessionGuard, TokenStore,
};
pub use transport::{Transport, TransportError, UreqTransport};
