use serde::{Deserialize, Serialize};

/// The persisted state a later session needs to present the same device.
///
/// Every field is optional when restoring: missing identifiers are generated
/// and a missing cookie dump starts from an empty jar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid:       Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id:  Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_id:      Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Serialized cookie jar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie:     Option<String>,
    /// Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_ts: Option<i64>,
}

impl Settings {
    pub fn from_json(s: &str) -> crate::Result<Self> { Ok(serde_json::from_str(s)?) }

    pub fn to_json(&self) -> crate::Result<String> { Ok(serde_json::to_string_pretty(self)?) }
}

// Empty strings in hand-edited blobs count as missing.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
