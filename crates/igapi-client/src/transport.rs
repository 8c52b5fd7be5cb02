use std::future::Future;

/// HTTP method of a resolved request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A fully resolved request, ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method:  Method,
    pub url:     String,
    pub query:   Vec<(String, String)>,
    /// URL-encoded POST fields. `None` sends no body.
    pub form:    Option<Vec<(String, String)>>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn form_field(&self, name: &str) -> Option<&str> {
        self.form
            .as_ref()?
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body:   String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: String::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

/// One HTTP round trip.
///
/// Implementations own connection pooling, timeouts and cookie upserts.
/// A non-2xx status is a successful round trip; only failures to get any
/// response at all are errors.
///
/// # Implementations
///
/// - [`ReqwestTransport`]: Production implementation using `reqwest`
/// - Scripted fakes in tests
pub trait Transport: Send + Sync {
    type Error: std::error::Error + Send + 'static;

    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = std::result::Result<HttpResponse, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::sync::Arc;

    use super::*;
    use crate::config::ClientConfig;
    use crate::cookies::CookieJar;
    use crate::error::{Error, Result};

    /// Production transport. Shares the client's cookie jar so every
    /// response's `Set-Cookie` headers land where the session view reads.
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new(config: &ClientConfig, cookies: Arc<CookieJar>) -> Result<Self> {
            let client = reqwest::Client::builder()
                .cookie_provider(cookies)
                .connect_timeout(config.timeout())
                .timeout(config.timeout())
                .pool_max_idle_per_host(config.max_connections)
                .build()
                .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
            Ok(Self { client })
        }
    }

    impl Transport for ReqwestTransport {
        type Error = reqwest::Error;

        async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, Self::Error> {
            let mut builder = match request.method {
                Method::Get => self.client.get(&request.url),
                Method::Post => self.client.post(&request.url),
            };

            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(form) = &request.form {
                builder = builder.form(form);
            }

            let response = builder.send().await?;
            let status = response.status();
            let body = response.text().await?;

            Ok(HttpResponse {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestTransport;
