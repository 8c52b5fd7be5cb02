//! Mapping of failed responses onto [`Error`] kinds.
//!
//! The status code is checked first, then the JSON body's `error_type` (or
//! `message`) marker. The body is attached verbatim to every classified error.

use serde_json::Value;

use crate::error::{Error, ErrorResponse};

const THROTTLED_MESSAGE: &str = "Please wait a few minutes before you try again.";

/// A non-2xx response, as handed over by the dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct FailedResponse<'a> {
    pub status:              u16,
    pub reason:              &'a str,
    pub body:                &'a str,
    /// Whether the request went out with an auth cookie set.
    pub auth_cookie_present: bool,
}

/// Classify a failed response.
///
/// ```
/// use igapi_client::classify::{FailedResponse, classify};
/// use igapi_client::ErrorKind;
///
/// let err = classify(&FailedResponse {
///     status: 400,
///     reason: "Bad Request",
///     body: r#"{"message":"challenge_required","challenge":{"url":"https://i.instagram.com/challenge/"}}"#,
///     auth_cookie_present: true,
/// });
/// assert_eq!(err.kind(), ErrorKind::ChallengeRequired);
/// assert_eq!(err.challenge_url(), Some("https://i.instagram.com/challenge/"));
/// ```
pub fn classify(failed: &FailedResponse<'_>) -> Error {
    let status = failed.status;
    let response = |message: &str| ErrorResponse::new(message).code(status).body(failed.body);

    if status == 431 {
        return Error::HeadersTooLarge(response(fallback_message(failed)));
    }

    let Ok(Value::Object(json)) = serde_json::from_str::<Value>(failed.body) else {
        if status == 429 {
            return Error::Throttled(response(THROTTLED_MESSAGE));
        }
        return Error::Client(response(fallback_message(failed)));
    };

    let message = json.get("message").and_then(Value::as_str);
    let marker = json
        .get("error_type")
        .and_then(Value::as_str)
        .or(message)
        .unwrap_or_default();
    let text = message.unwrap_or(marker);

    if status == 429 {
        let text = if text.is_empty() { THROTTLED_MESSAGE } else { text };
        return Error::Throttled(response(text));
    }

    let challenge_url = || {
        json.get("challenge")
            .and_then(|c| c.get("url"))
            .or_else(|| json.get("checkpoint_url"))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let has = |needle: &str| marker.contains(needle);

    if has("bad_password") || has("invalid_user") {
        Error::LoginFailed(response(text))
    } else if has("login_required") {
        if failed.auth_cookie_present {
            Error::CookieExpired(response(text))
        } else {
            Error::LoginRequired(response(text))
        }
    } else if has("checkpoint_required")
        || has("checkpoint_challenge_required")
        || has("checkpoint_logged_out")
    {
        Error::CheckpointRequired {
            response:      response(text),
            challenge_url: challenge_url(),
        }
    } else if has("challenge_required") {
        Error::ChallengeRequired {
            response:      response(text),
            challenge_url: challenge_url(),
        }
    } else if has("sentry_block") {
        Error::SentryBlock(response(text))
    } else if has("rate_limit_error") || text.contains("Please wait a few minutes") {
        Error::Throttled(response(text))
    } else if !text.is_empty() {
        Error::Client(response(text))
    } else {
        Error::Client(response(fallback_message(failed)))
    }
}

fn fallback_message<'a>(failed: &FailedResponse<'a>) -> &'a str {
    if failed.reason.is_empty() {
        "Unknown error"
    } else {
        failed.reason
    }
}
