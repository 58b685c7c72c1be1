//! Help text and verbosity helpers

use crate::cli::args::Cli;
use clap::CommandFactory;

pub fn generate_help() -> String {
    Cli::command().render_help().to_string()
}

/// Log filter for a verbosity count
///
/// A level from the config file applies only when no `-v` was given.
pub fn get_log_level(verbose: u8, configured: Option<&str>) -> String {
    match (verbose, configured) {
        (0, Some(level)) => level.to_string(),
        (0, None) => "info".to_string(),
        (1, _) => "debug".to_string(),
        (2, _) => "trace".to_string(),
        _ => "trace,hyper=debug,reqwest=debug".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_by_verbosity() {
        assert_eq!(get_log_level(0, None), "info");
        assert_eq!(get_log_level(0, Some("warn")), "warn");
        assert_eq!(get_log_level(1, Some("warn")), "debug");
        assert_eq!(get_log_level(2, None), "trace");
        assert!(get_log_level(5, None).starts_with("trace"));
    }

    #[test]
    fn test_help_lists_commands() {
        let help = generate_help();
        for command in ["run", "check", "validate"] {
            assert!(help.contains(command));
        }
    }
}
