use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};

use super::Paths;
use super::identity::{AdIdArg, DeviceIdArg, UserAgentArg, UuidArg};
use super::session::LoginArg;
use super::shortcode::{ExpandArg, ShortcodeArg};

#[derive(Clone, Debug, Parser)]
#[command(name = "igapi", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Log more. Repeat for everything.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Client configuration file (TOML). Default: ~/.igapi/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Persisted session settings (JSON). Default: ~/.igapi/settings.json
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    // Session
    #[command(name = "login", about = "Log in and save the session settings")]
    Login(LoginArg),
    #[command(alias = "me", name = "whoami", about = "Show the logged in account")]
    Whoami,
    #[command(name = "logout", about = "End the session and drop its cookies")]
    Logout,

    // Identity
    #[command(name = "device-id", about = "Generate an android device id")]
    DeviceId(DeviceIdArg),
    #[command(name = "uuid", about = "Generate a UUID")]
    Uuid(UuidArg),
    #[command(name = "ad-id", about = "Generate an advertising id")]
    AdId(AdIdArg),
    #[command(alias = "ua", name = "useragent", about = "Validate or generate a user agent")]
    UserAgent(UserAgentArg),

    // Media ids
    #[command(name = "shortcode", about = "Shortcode of a media id")]
    Shortcode(ShortcodeArg),
    #[command(name = "expand", about = "Media pk of a shortcode")]
    Expand(ExpandArg),

    #[command(name = "completions", about = "Print shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl App {
    fn paths(&self) -> Paths {
        Paths {
            config:   self.config.clone(),
            settings: self.settings.clone(),
        }
    }

    pub async fn run(self) -> Result<()> {
        let paths = self.paths();
        match self.cmd {
            Commands::Login(arg) => arg.run(&paths).await,
            Commands::Whoami => super::session::whoami(&paths).await,
            Commands::Logout => super::session::logout(&paths).await,
            Commands::DeviceId(arg) => arg.run(),
            Commands::Uuid(arg) => arg.run(),
            Commands::AdId(arg) => arg.run(),
            Commands::UserAgent(arg) => arg.run(&paths),
            Commands::Shortcode(arg) => arg.run(),
            Commands::Expand(arg) => arg.run(),
            Commands::Completions { shell } => {
                generate(shell, &mut App::command(), "igapi", &mut std::io::stdout());
                Ok(())
            }
        }
    }
}
