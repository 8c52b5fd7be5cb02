pub mod app;
pub mod identity;
pub mod session;
pub mod shortcode;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use igapi_client::{ClientConfig, Settings};

const SETTINGS_FILE: &str = "settings.json";
const CONFIG_FILE: &str = "config.toml";

/// Where the CLI keeps its files. Unset paths fall back to `~/.igapi/`.
#[derive(Debug, Clone, Default)]
pub struct Paths {
    pub config:   Option<PathBuf>,
    pub settings: Option<PathBuf>,
}

impl Paths {
    fn data_dir() -> Result<PathBuf> {
        let home = home::home_dir().context("Failed to locate the home directory")?;
        Ok(home.join(".igapi"))
    }

    pub fn settings_path(&self) -> Result<PathBuf> {
        match &self.settings {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join(SETTINGS_FILE)),
        }
    }

    /// The configured TOML file, or defaults when none exists.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => {
                let path = Self::data_dir()?.join(CONFIG_FILE);
                if !path.exists() {
                    return Ok(ClientConfig::default());
                }
                path
            }
        };
        ClientConfig::from_toml_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    pub fn load_settings(&self) -> Result<Option<Settings>> {
        let path = self.settings_path()?;
        read_settings(&path)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let path = self.settings_path()?;
        write_settings(&path, settings)
    }
}

pub fn read_settings(path: &Path) -> Result<Option<Settings>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings = Settings::from_json(&text)
        .with_context(|| format!("Malformed settings in {}", path.display()))?;
    Ok(Some(settings))
}

pub fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, settings.to_json()?)
        .with_context(|| format!("Failed to write settings to {}", path.display()))
}
