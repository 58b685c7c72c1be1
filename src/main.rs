use anyhow::Context;
use clap::Parser;
use medal_helper::cli::{execute_command, get_log_level, Cli};
use medal_helper::config::ConfigLoader;
use tracing::{debug, error, trace};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_path(path);
    }
    let loaded = loader.load().await;

    let configured = loaded.as_ref().ok().and_then(|c| c.log_level.as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(get_log_level(cli.verbose, configured))
        .with_target(cli.verbose >= 2)
        .with_thread_ids(cli.verbose >= 3)
        .with_line_number(cli.verbose >= 3)
        .init();

    debug!("medal-helper started with verbosity level: {}", cli.verbose);
    if let Ok(path) = loader.resolve_path() {
        debug!("Configuration file: {}", path.display());
    }
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let result = match loaded.context("Failed to load configuration") {
        Ok(config) => execute_command(cli.command, config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
