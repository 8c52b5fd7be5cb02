//! Error types for igapi-client.

use std::fmt;

use igapi_identity::IdentityError;
use igapi_sign::SignError;
use thiserror::Error;

/// What the server (or the network) said when a call failed.
///
/// `body` is the response text exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
    pub code:    Option<u16>,
    pub body:    Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code:    None,
            body:    None,
        }
    }

    pub fn code(mut self, code: u16) -> Self {
        self.code = Some(code);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (HTTP {code})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("login required: {0}")]
    LoginRequired(ErrorResponse),

    #[error("login failed: {0}")]
    LoginFailed(ErrorResponse),

    #[error("checkpoint required: {response}")]
    CheckpointRequired {
        response:      ErrorResponse,
        challenge_url: Option<String>,
    },

    #[error("challenge required: {response}")]
    ChallengeRequired {
        response:      ErrorResponse,
        challenge_url: Option<String>,
    },

    #[error("throttled: {0}")]
    Throttled(ErrorResponse),

    #[error("cookie expired: {0}")]
    CookieExpired(ErrorResponse),

    #[error("sentry block: {0}")]
    SentryBlock(ErrorResponse),

    #[error("request headers too large: {0}")]
    HeadersTooLarge(ErrorResponse),

    #[error("client error: {0}")]
    Client(ErrorResponse),

    #[error("connection error: {0}")]
    Connection(ErrorResponse),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Sign(#[from] SignError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Kind tag of an [`Error`], for retry and backoff decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    LoginRequired,
    LoginFailed,
    CheckpointRequired,
    ChallengeRequired,
    Throttled,
    CookieExpired,
    SentryBlock,
    HeadersTooLarge,
    Client,
    Connection,
    Local,
}

impl ErrorKind {
    /// Whether repeating the same call later can succeed without caller action.
    pub fn is_retryable(self) -> bool { matches!(self, ErrorKind::Throttled | ErrorKind::Connection) }

    /// Whether the session has to be re-established before further calls.
    pub fn needs_login(self) -> bool {
        matches!(self, ErrorKind::LoginRequired | ErrorKind::CookieExpired)
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::LoginRequired(_) => ErrorKind::LoginRequired,
            Error::LoginFailed(_) => ErrorKind::LoginFailed,
            Error::CheckpointRequired { .. } => ErrorKind::CheckpointRequired,
            Error::ChallengeRequired { .. } => ErrorKind::ChallengeRequired,
            Error::Throttled(_) => ErrorKind::Throttled,
            Error::CookieExpired(_) => ErrorKind::CookieExpired,
            Error::SentryBlock(_) => ErrorKind::SentryBlock,
            Error::HeadersTooLarge(_) => ErrorKind::HeadersTooLarge,
            Error::Client(_) => ErrorKind::Client,
            Error::Connection(_) => ErrorKind::Connection,
            Error::Config(_)
            | Error::InvalidArgument(_)
            | Error::NotImplemented(_)
            | Error::Identity(_)
            | Error::Sign(_)
            | Error::Json(_) => ErrorKind::Local,
        }
    }

    /// The server response behind an API error. `None` for local failures.
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            Error::LoginRequired(r)
            | Error::LoginFailed(r)
            | Error::Throttled(r)
            | Error::CookieExpired(r)
            | Error::SentryBlock(r)
            | Error::HeadersTooLarge(r)
            | Error::Client(r)
            | Error::Connection(r) => Some(r),
            Error::CheckpointRequired { response, .. } | Error::ChallengeRequired { response, .. } => {
                Some(response)
            }
            _ => None,
        }
    }

    pub fn code(&self) -> Option<u16> { self.response().and_then(|r| r.code) }

    pub fn error_response(&self) -> Option<&str> {
        self.response().and_then(|r| r.body.as_deref())
    }

    pub fn challenge_url(&self) -> Option<&str> {
        match self {
            Error::CheckpointRequired { challenge_url, .. }
            | Error::ChallengeRequired { challenge_url, .. } => challenge_url.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
