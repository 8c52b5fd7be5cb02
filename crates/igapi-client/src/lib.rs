//! Client core for the private Instagram app API.
//!
//! # Architecture
//!
//! - [`config`] - Every recognized client option and its default
//! - [`cookies`] - Cookie storage shared with the transport
//! - [`session`] - Read-through view of the auth cookies
//! - [`transport`] - HTTP seam with a `reqwest` implementation
//! - [`client`] - Request dispatch: signing, URL building, response unwrapping
//! - [`classify`] - Mapping of failed responses onto [`Error`] kinds
//! - [`endpoints`] - Endpoint groups that take the client as a dependency
//!
//! The client never retries. Every classified error reaches the caller of
//! [`Client::call_api`] with the raw response body attached.

pub use client::{Body, Call, Client, ClientBuilder, LoginCallback};
pub use config::{ClientConfig, Credentials};
pub use cookies::{COOKIE_DOMAIN, CookieJar, CookieSource, StoredCookie};
pub use error::{Error, ErrorKind, ErrorResponse, Result};
pub use retry::backoff_delay;
pub use session::{AuthenticatedParams, SessionState};
pub use settings::Settings;
pub use transport::{HttpRequest, HttpResponse, Method, Transport};

#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;

pub use igapi_identity as identity;
pub use igapi_sign as sign;

pub mod classify;
pub mod client;
pub mod config;
pub mod cookies;
pub mod endpoints;
mod error;
mod headers;
mod retry;
pub mod session;
mod settings;
pub mod transport;
