//! Command routing and execution

use crate::account::Fleet;
use crate::cli::args::Commands;
use crate::config::AppConfig;
use anyhow::{bail, Context, Result};
use tracing::{info, warn};

/// Execute a CLI command against a loaded configuration
pub async fn execute_command(command: Option<Commands>, config: AppConfig) -> Result<()> {
    match command.unwrap_or(Commands::Run) {
        Commands::Run => run_accounts(config).await,
        Commands::Check => check_accounts(config).await,
        Commands::Validate => {
            println!(
                "Configuration OK: {} account(s), {} mode",
                config.accounts.len(),
                config.engine.mode
            );
            Ok(())
        }
    }
}

async fn run_accounts(config: AppConfig) -> Result<()> {
    let fleet = Fleet::from_config(&config).context("Failed to set up accounts")?;
    let summary = fleet.run().await;

    if summary.logged_out > 0 || summary.crashed > 0 {
        bail!(
            "{} of {} account(s) could not run",
            summary.logged_out + summary.crashed,
            summary.total()
        );
    }
    if summary.incomplete > 0 {
        warn!("{} account(s) still have medals below the cap", summary.incomplete);
    }
    Ok(())
}

async fn check_accounts(config: AppConfig) -> Result<()> {
    let total = config.accounts.len();
    let fleet = Fleet::from_config(&config).context("Failed to set up accounts")?;
    let checks = fleet.check().await;

    for (name, report) in &checks {
        match report {
            Ok(report) => println!("Account {name}\n{report}"),
            Err(e) => warn!(account = %name, "Medal check failed: {}", e),
        }
    }

    info!("Checked {} of {} account(s)", checks.len(), total);
    if checks.len() < total {
        bail!("{} account(s) failed to log in", total - checks.len());
    }
    Ok(())
}
