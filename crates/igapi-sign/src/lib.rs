//! Request signing for the Instagram app API.
//!
//! A signed request never sends its fields individually. The payload is
//! encoded once as compact JSON, the HMAC-SHA256 of those exact bytes is
//! computed, and both travel together as
//! `signed_body={signature}.{json}` next to `ig_sig_key_version`.
//!
//! # Example
//!
//! ```
//! use igapi_sign::SigningKey;
//! use serde_json::json;
//!
//! let key = SigningKey::new(4, "test-signing-key");
//! let envelope = key.envelope(&json!({"a": 1, "b": "x"})).unwrap();
//!
//! assert_eq!(envelope.json_body, r#"{"a":1,"b":"x"}"#);
//! assert!(envelope.verify(&key));
//! ```

pub use self::breadcrumb::{gen_user_breadcrumb, user_breadcrumb};
pub use self::envelope::{KEY_VERSION_FIELD, SIGNED_BODY_FIELD, SignedEnvelope};
pub use self::error::{Result, SignError};
pub use self::key::{DEFAULT_KEY_VERSION, DEFAULT_SIGNATURE_KEY, SigningKey, canonical_json};

mod breadcrumb;
mod envelope;
mod error;
mod key;
