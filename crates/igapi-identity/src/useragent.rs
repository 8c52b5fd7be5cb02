//! The Android app user-agent grammar.
//!
//! ```text
//! Instagram {app_version} Android ({android_version}/{android_release}; {dpi}; {resolution};
//!     {manufacturer}; {device}; {model}; {chipset}; en_US; {version_code})
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{IdentityError, Result};

static USER_AGENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Instagram\s(?<app_version>[^\s]+)\sAndroid\s\((?<android_version>[0-9]+)/(?<android_release>[0-9\.]+);\s(?<dpi>\d+dpi);\s(?<resolution>\d+x\d+);\s(?<manufacturer>[^;]+);\s(?<device>[^;]+);\s(?<model>[^;]+);\s(?<chipset>[^;]+);\s[a-z]+_[A-Z]+;\s(?<version_code>\d+)").unwrap()
});

/// The device and app build a client claims to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    pub app_version:     String,
    pub android_version: u32,
    pub android_release: String,
    pub manufacturer:    String,
    pub device:          String,
    pub model:           String,
    pub dpi:             String,
    pub resolution:      String,
    pub chipset:         String,
    pub version_code:    String,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            app_version:     "76.0.0.15.395".to_string(),
            android_version: 24,
            android_release: "7.0".to_string(),
            manufacturer:    "samsung".to_string(),
            device:          "SM-G930F".to_string(),
            model:           "herolte".to_string(),
            dpi:             "640dpi".to_string(),
            resolution:      "1440x2560".to_string(),
            chipset:         "samsungexynos8890".to_string(),
            version_code:    "138226743".to_string(),
        }
    }
}

impl DeviceProfile {
    /// Parse a user-agent string. The pattern is searched, not anchored.
    pub fn parse(s: &str) -> Result<Self> {
        let caps = USER_AGENT_REGEX
            .captures(s)
            .ok_or_else(|| IdentityError::InvalidUserAgent(s.to_string()))?;
        let field = |name: &str| caps.name(name).map(|m| m.as_str().to_string()).unwrap_or_default();

        let android_version = field("android_version")
            .parse()
            .map_err(|_| IdentityError::InvalidUserAgent(s.to_string()))?;

        Ok(Self {
            app_version: field("app_version"),
            android_version,
            android_release: field("android_release"),
            manufacturer: field("manufacturer"),
            device: field("device"),
            model: field("model"),
            dpi: field("dpi"),
            resolution: field("resolution"),
            chipset: field("chipset"),
            version_code: field("version_code"),
        })
    }

    pub fn user_agent(&self) -> String { self.to_string() }
}

impl std::str::FromStr for DeviceProfile {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self> { DeviceProfile::parse(s) }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Instagram {} Android ({}/{}; {}; {}; {}; {}; {}; {}; en_US; {})",
            self.app_version,
            self.android_version,
            self.android_release,
            self.dpi,
            self.resolution,
            self.manufacturer,
            self.device,
            self.model,
            self.chipset,
            self.version_code,
        )
    }
}

/// Render the user-agent string for a device profile.
pub fn generate_useragent(profile: &DeviceProfile) -> String { profile.user_agent() }

/// Check a user-agent string against the grammar and recover its fields.
pub fn validate_useragent(value: &str) -> Result<DeviceProfile> { DeviceProfile::parse(value) }
