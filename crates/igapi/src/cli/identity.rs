use anyhow::{Context, Result};
use clap::Args;
use igapi_client::identity::{
    DeviceProfile, generate_ad_id, generate_device_id, generate_uuid, validate_useragent,
};

use super::Paths;

#[derive(Args, Clone, Debug)]
pub struct DeviceIdArg {
    /// Derive the id from this seed instead of at random
    #[arg(long)]
    pub seed: Option<String>,
}

impl DeviceIdArg {
    pub fn run(self) -> Result<()> {
        println!("{}", generate_device_id(self.seed.as_deref()));
        Ok(())
    }
}

#[derive(Args, Clone, Debug)]
pub struct UuidArg {
    /// Print the 32 character hex form
    #[arg(long)]
    pub hex:  bool,
    #[arg(long)]
    pub seed: Option<String>,
}

impl UuidArg {
    pub fn run(self) -> Result<()> {
        println!("{}", generate_uuid(self.hex, self.seed.as_deref()));
        Ok(())
    }
}

#[derive(Args, Clone, Debug)]
pub struct AdIdArg {
    /// Usually the username
    #[arg(long)]
    pub seed: Option<String>,
}

impl AdIdArg {
    pub fn run(self) -> Result<()> {
        println!("{}", generate_ad_id(self.seed.as_deref()));
        Ok(())
    }
}

#[derive(Args, Clone, Debug)]
pub struct UserAgentArg {
    /// User agent to validate. Without one, print the configured device's.
    pub value: Option<String>,
}

impl UserAgentArg {
    pub fn run(self, paths: &Paths) -> Result<()> {
        let profile = match &self.value {
            Some(value) => validate_useragent(value).context("Invalid user agent")?,
            None => paths.client_config()?.resolved_device()?,
        };
        println!("{}", render_profile(&profile)?);
        Ok(())
    }
}

fn render_profile(profile: &DeviceProfile) -> Result<String> {
    let mut json = serde_json::to_value(profile)?;
    if let Some(map) = json.as_object_mut() {
        map.insert("user_agent".to_string(), profile.user_agent().into());
    }
    Ok(serde_json::to_string_pretty(&json)?)
}
