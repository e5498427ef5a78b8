use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vigil::AppConfig;
use vigil_core::{DaemonRegistry, RunSummary, Supervisor, init_logging};
use vigil_dispatch::DispatcherDaemon;

/// Vigil daemon: supervises the `/service` dispatcher.
#[derive(Parser, Debug)]
#[command(name = "vigild", version, about)]
struct Cli {
    /// Config file path. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (debug level).
    #[arg(short, long)]
    verbose: bool,

    /// Validate config and exit.
    #[arg(long)]
    validate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    if cli.validate {
        println!("config is valid");
        return Ok(());
    }

    let filter = if cli.verbose { "debug" } else { config.log.filter.as_str() };
    init_logging(filter);

    let daemon = DispatcherDaemon::from_config(&config.dispatcher, &config.weather)
        .context("failed to build dispatcher")?;

    let mut registry = DaemonRegistry::new();
    registry.register(daemon.into_descriptor(&config.dispatcher))?;

    let summary = Supervisor::new(registry)
        .with_shutdown_grace(config.supervisor.shutdown_grace)
        .start_all()
        .await?;

    if let RunSummary::Stopped { signal, .. } = summary {
        tracing::debug!(source = "Main", signal = signal.as_i32(), "exiting");
    }
    Ok(())
}
