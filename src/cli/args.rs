//! CLI argument structures

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Keep fan medals growing by watching live rooms
#[derive(Parser, Debug)]
#[command(name = "medal-helper")]
#[command(about = "medal-helper - Daily intimacy runs for every configured account", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run every account until its medals are full (default command)
    Run,

    /// Log in and print medal reports without watching
    Check,

    /// Load and validate the configuration file
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["medal-helper"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["medal-helper", "check", "-vv", "--config", "conf.toml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Check));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("conf.toml")));
    }
}
