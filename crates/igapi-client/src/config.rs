//! Client configuration.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use igapi_identity::DeviceProfile;
use igapi_sign::{DEFAULT_KEY_VERSION, DEFAULT_SIGNATURE_KEY, SigningKey};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://i.instagram.com/api/{version}/";
pub const DEFAULT_IG_CAPABILITIES: &str = "3brTvw==";
pub const DEFAULT_APPLICATION_ID: &str = "567067343352427";
pub const DEFAULT_FB_HTTP_ENGINE: &str = "Liger";

/// Every option the client recognizes.
///
/// # Examples
///
/// ```
/// use igapi_client::ClientConfig;
///
/// let config = ClientConfig::from_toml_str(r#"
///     timeout_secs = 30
///
///     [device]
///     manufacturer = "Google"
///     device = "Pixel"
/// "#).unwrap();
///
/// assert_eq!(config.timeout_secs, 30);
/// assert_eq!(config.device.android_version, 24);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL template. Must contain `{version}`.
    pub api_url: String,

    /// Connect and read timeout for each request.
    ///
    /// Default: 15
    pub timeout_secs: u64,

    /// Idle connections kept open per host. Busy connections are not capped.
    ///
    /// Default: 10
    pub max_connections: usize,

    pub signature_key: String,
    pub key_version:   u32,

    pub ig_capabilities: String,
    pub application_id:  String,
    pub fb_http_engine:  String,

    pub device: DeviceProfile,

    /// A full user-agent string. When set, it is parsed and replaces `device`.
    pub user_agent: Option<String>,

    /// Log a warning whenever a deprecated client method is used.
    ///
    /// Default: false
    pub report_deprecations: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url:             DEFAULT_API_URL.to_string(),
            timeout_secs:        15,
            max_connections:     10,
            signature_key:       DEFAULT_SIGNATURE_KEY.to_string(),
            key_version:         DEFAULT_KEY_VERSION,
            ig_capabilities:     DEFAULT_IG_CAPABILITIES.to_string(),
            application_id:      DEFAULT_APPLICATION_ID.to_string(),
            fb_http_engine:      DEFAULT_FB_HTTP_ENGINE.to_string(),
            device:              DeviceProfile::default(),
            user_agent:          None,
            report_deprecations: false,
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.api_url.contains("{version}") {
            return Err(Error::Config(format!(
                "api_url must contain {{version}}: {}",
                self.api_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }
        if self.max_connections == 0 {
            return Err(Error::Config("max_connections must be positive".to_string()));
        }
        if self.signature_key.is_empty() {
            return Err(Error::Config("signature_key must not be empty".to_string()));
        }
        self.resolved_device()?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

    pub fn signing_key(&self) -> SigningKey {
        SigningKey::new(self.key_version, self.signature_key.as_bytes())
    }

    /// The device profile in effect, taking a custom user agent into account.
    pub fn resolved_device(&self) -> Result<DeviceProfile> {
        match &self.user_agent {
            Some(ua) => Ok(DeviceProfile::parse(ua)?),
            None => Ok(self.device.clone()),
        }
    }

    /// `api_url` with the version filled in.
    pub fn base_url(&self, version: &str) -> String { self.api_url.replace("{version}", version) }
}

/// Login credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"{ ... }")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.base_url("v1"), "https://i.instagram.com/api/v1/");
        assert_eq!(config.signing_key().version(), 4);
    }

    #[test]
    fn rejects_bad_values() {
        let config = ClientConfig {
            api_url: "https://example.com/api/".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = ClientConfig {
            timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            user_agent: Some("curl/8.0".to_string()),
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Identity(_))));
    }

    #[test]
    fn custom_user_agent_replaces_device() {
        let ua = "Instagram 10.0.0.1 Android (29/10; 420dpi; 1080x1920; Google; Pixel; sailfish; qcom; en_US; 12345)";
        let config = ClientConfig {
            user_agent: Some(ua.to_string()),
            ..ClientConfig::default()
        };
        let device = config.resolved_device().unwrap();
        assert_eq!(device.manufacturer, "Google");
        assert_eq!(device.user_agent(), ua);
    }

    #[test]
    fn toml_partial_override() {
        let config = ClientConfig::from_toml_str("key_version = 5\nreport_deprecations = true").unwrap();
        assert_eq!(config.key_version, 5);
        assert!(config.report_deprecations);
        assert_eq!(config.api_url, DEFAULT_API_URL);

        assert!(ClientConfig::from_toml_str("timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("igapi.toml");
        std::fs::write(&path, "max_connections = 4\n").unwrap();
        assert_eq!(ClientConfig::from_toml_file(&path).unwrap().max_connections, 4);
        assert!(ClientConfig::from_toml_file(dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn credentials_debug_hides_password() {
        let rendered = format!("{:?}", Credentials::new("alice", "hunter2"));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }
}
