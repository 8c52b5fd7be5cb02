use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::app::App;

mod cli;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "igapi=debug,igapi_client=debug",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::parse();
    init_tracing(app.verbose);
    app.run().await
}
