mod auth;
mod classify;
mod cli;
mod config;
mod error;
mod message;
mod providers;
mod slack;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting cinotify - CI workflow notifier");
    cli.execute().await?;

    Ok(())
}
