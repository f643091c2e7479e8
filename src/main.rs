mod calendar;
mod cli;
mod config;
mod download;
mod fetch;
mod parquet;
mod plot;
mod reading;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.run_config()?;

    match &cli.command {
        Commands::Day { .. } => match command::day(&config).await {
            Ok(filename) => println!("Plot saved to `{}`", filename),
            Err(e) => eprintln!("Error: {:#}", e),
        },
        Commands::Range { .. } => match command::range(&config).await {
            Ok(filename) => println!("Plot saved to `{}`", filename),
            Err(e) => eprintln!("Error: {:#}", e),
        },
    }

    Ok(())
}
