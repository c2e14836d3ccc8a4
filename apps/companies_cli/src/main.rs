use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use client_core::{load_settings, HttpCompanyClient};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Command;

#[derive(Parser, Debug)]
#[command(about = "Manage companies and their contacts from the terminal")]
struct Args {
    /// Backend base url; overrides config file and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Config file to load instead of ./companies.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref(), args.api_url.as_deref())?;
    let client = HttpCompanyClient::new(&settings.api_base_url)?;
    tracing::debug!(api = client.base_url(), "using backend");

    let stdout = std::io::stdout();
    let stdin = std::io::stdin();
    commands::run(&client, args.command, &mut stdout.lock(), &mut stdin.lock()).await
}
