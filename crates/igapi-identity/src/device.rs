//! Synthetic device identifiers.
//!
//! Seeded derivations are deterministic: the same seed always yields the same
//! identifier. Unseeded calls fall back to a random v4 UUID.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

const DEVICE_ID_PREFIX: &str = "android-";

/// Generate a UUID, either from the MD5 digest of `seed` or at random.
///
/// The 16 digest bytes are used as the UUID verbatim, no version or variant
/// bits are rewritten. An empty seed counts as no seed.
///
/// Returns the 32 character hex form when `hex` is set, otherwise the dashed form.
///
/// ```
/// use igapi_identity::generate_uuid;
///
/// assert_eq!(generate_uuid(false, Some("alice")), "6384e2b2-184b-cbf5-8ecc-f10ca7a6563c");
/// assert_eq!(generate_uuid(true, Some("alice")), "6384e2b2184bcbf58eccf10ca7a6563c");
/// ```
pub fn generate_uuid(hex: bool, seed: Option<&str>) -> String {
    let id = match seed.filter(|s| !s.is_empty()) {
        Some(seed) => {
            let digest = Md5::digest(seed.as_bytes());
            let mut bytes = [0u8; 16];
            bytes.copy_from_slice(&digest);
            Uuid::from_bytes(bytes)
        }
        None => Uuid::new_v4(),
    };

    if hex {
        id.simple().to_string()
    } else {
        id.hyphenated().to_string()
    }
}

/// Generate an android device id: `android-` followed by 16 hex chars.
pub fn generate_device_id(seed: Option<&str>) -> String {
    let hex = generate_uuid(true, seed);
    format!("{DEVICE_ID_PREFIX}{}", &hex[..16])
}

/// Generate an advertising id.
///
/// The seed is a personally identifying value (normally the username), so it
/// is replaced by its SHA-256 hex digest before it reaches [`generate_uuid`].
/// Persisted sessions depend on this exact derivation.
pub fn generate_ad_id(seed: Option<&str>) -> String {
    let mangled = seed
        .filter(|s| !s.is_empty())
        .map(|s| hex::encode(Sha256::digest(s.as_bytes())));
    generate_uuid(false, mangled.as_deref())
}

/// The phone id is never stored, it is always derived from the device id.
pub fn phone_id(device_id: &str) -> String {
    generate_uuid(false, Some(device_id))
}

/// The identifiers a client presents as one consistent device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub uuid:       String,
    pub device_id:  String,
    pub ad_id:      String,
    pub session_id: String,
}

impl DeviceIdentity {
    /// Create a fresh identity. Only the advertising id is seeded.
    pub fn generate(ad_seed: Option<&str>) -> Self {
        Self {
            uuid:       generate_uuid(false, None),
            device_id:  generate_device_id(None),
            ad_id:      generate_ad_id(ad_seed),
            session_id: generate_uuid(false, None),
        }
    }

    pub fn phone_id(&self) -> String { phone_id(&self.device_id) }
}
