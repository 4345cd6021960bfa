//! `planme` binary entry point.

use std::io::Write;

use clap::Parser;
use eyre::WrapErr;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use planme::cli::{App, Cli, run};
use planme::config::AppConfig;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("planme=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("planme=info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::default_path()?,
    };
    let config = AppConfig::load(&config_path)?;
    tracing::debug!(config = %config_path, data_dir = %config.data_dir, "configuration loaded");

    let mut app = App::open(config).wrap_err("failed to open data directory")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&mut app, cli.command, &mut out).await?;
    out.flush()?;
    Ok(())
}
