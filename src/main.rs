use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

use fieldtuner::cli::{App, Cli};
use fieldtuner::config::{app::parse_level, AppConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // LOG_LEVEL in the environment overrides the config file
    let log_level = match std::env::var("LOG_LEVEL") {
        Ok(level) => parse_level(&level),
        Err(_) => config.tracing_level(),
    };

    // Logs go to stderr so command output stays pipeable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!(command = ?cli.command, "starting");
    App::new(config)?.run(cli.command)
}
