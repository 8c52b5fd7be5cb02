use anyhow::{Context, Result, bail};
use clap::Args;
use igapi_client::endpoints::accounts;
use igapi_client::{Client, ClientBuilder, ReqwestTransport, Settings};
use tracing::info;

use super::Paths;

#[derive(Args, Clone, Debug)]
pub struct LoginArg {
    #[arg(short, long)]
    pub username: String,
    #[arg(short, long, env = "IGAPI_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl LoginArg {
    /// Log in fresh. A previous device identity is reused, its cookies are not.
    pub async fn run(self, paths: &Paths) -> Result<()> {
        let config = paths.client_config()?;
        let previous = paths.load_settings()?.unwrap_or_default();
        let settings = Settings {
            cookie: None,
            ..previous
        };

        let client = ClientBuilder::new(config)
            .settings(settings)
            .credentials(&self.username, &self.password)
            .connect_reqwest()
            .await
            .context("Login failed")?;

        paths.save_settings(&client.settings()?)?;
        info!(path = %paths.settings_path()?.display(), "session saved");
        println!(
            "Logged in as {} ({})",
            client.authenticated_user_name().unwrap_or(self.username),
            client.authenticated_user_id().unwrap_or_default()
        );
        Ok(())
    }
}

async fn restore(paths: &Paths) -> Result<Client<ReqwestTransport>> {
    let Some(settings) = paths.load_settings()? else {
        bail!("No saved session, run `igapi login` first");
    };
    ClientBuilder::new(paths.client_config()?)
        .settings(settings)
        .connect_reqwest()
        .await
        .context("Failed to restore the saved session")
}

pub async fn whoami(paths: &Paths) -> Result<()> {
    let client = restore(paths).await?;
    let response = accounts::current_user(&client).await?;
    paths.save_settings(&client.settings()?)?;

    let user = response.get("user").context("Response has no user")?;
    println!("{}", serde_json::to_string_pretty(user)?);
    Ok(())
}

pub async fn logout(paths: &Paths) -> Result<()> {
    let client = restore(paths).await?;
    accounts::logout(&client).await?;

    let settings = Settings {
        cookie: None,
        ..client.settings()?
    };
    paths.save_settings(&settings)?;
    println!("Logged out");
    Ok(())
}
