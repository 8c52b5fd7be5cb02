use std::fmt;

use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use crate::envelope::SignedEnvelope;
use crate::error::{Result, SignError};

type HmacSha256 = Hmac<Sha256>;

/// Key the client signs with unless configured otherwise.
pub const DEFAULT_SIGNATURE_KEY: &str =
    "4f8732eb9ba7d1c8e8897a75d6474d4eb3f5279137431b2aafb71fafe2abe178";

pub const DEFAULT_KEY_VERSION: u32 = 4;

/// Compact JSON encoding of a payload.
///
/// The returned string is the exact byte sequence that gets signed and sent;
/// it must not be re-serialized between the two.
pub fn canonical_json<T: Serialize + ?Sized>(payload: &T) -> Result<String> {
    Ok(serde_json::to_string(payload)?)
}

/// An HMAC-SHA256 secret together with the version the server knows it by.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    version: u32,
    secret:  Vec<u8>,
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("version", &self.version)
            .field("secret", &"{ ... }")
            .finish()
    }
}

impl Default for SigningKey {
    fn default() -> Self { Self::new(DEFAULT_KEY_VERSION, DEFAULT_SIGNATURE_KEY) }
}

impl SigningKey {
    pub fn new(version: u32, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            version,
            secret: secret.into(),
        }
    }

    pub fn version(&self) -> u32 { self.version }

    fn mac(&self) -> Result<HmacSha256> {
        <HmacSha256 as Mac>::new_from_slice(&self.secret).map_err(|_| SignError::InvalidKey)
    }

    /// Hex HMAC-SHA256 of `data`.
    pub fn sign_str(&self, data: &str) -> Result<String> {
        let mut mac = self.mac()?;
        mac.update(data.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Encode `payload` and sign the encoding.
    ///
    /// Returns `(signature_hex, canonical_json)`.
    pub fn sign<T: Serialize + ?Sized>(&self, payload: &T) -> Result<(String, String)> {
        let json = canonical_json(payload)?;
        let signature = self.sign_str(&json)?;
        Ok((signature, json))
    }

    pub fn envelope<T: Serialize + ?Sized>(&self, payload: &T) -> Result<SignedEnvelope> {
        let (signature, json_body) = self.sign(payload)?;
        Ok(SignedEnvelope {
            signature,
            json_body,
            key_version: self.version,
        })
    }

    pub fn verify_str(&self, data: &str, signature_hex: &str) -> bool {
        let Ok(expected) = hex::decode(signature_hex) else {
            return false;
        };
        match self.mac() {
            Ok(mut mac) => {
                mac.update(data.as_bytes());
                mac.verify_slice(&expected).is_ok()
            }
            Err(_) => false,
        }
    }
}
