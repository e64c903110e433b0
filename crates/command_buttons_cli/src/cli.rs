//! Command-line interface handling for the panel preview tool.
//!
//! This module provides command-line argument parsing using the `clap` crate.

use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

/// Command line arguments parsed from user input.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    /// Path to the panel configuration file
    pub config_path: PathBuf,
    /// Permissions granted to the simulated player
    pub grants: Vec<String>,
    /// Whether the simulated player is an admin
    pub admin: bool,
    /// Exec arguments to dispatch, e.g. `chat /tpa`
    pub exec: Option<Vec<String>>,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
}

impl CliArgs {
    fn command() -> Command {
        Command::new("Command Buttons")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Preview the command button panel and simulate button clicks")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Panel configuration file path")
                    .default_value("CommandButtons.json"),
            )
            .arg(
                Arg::new("grant")
                    .short('g')
                    .long("grant")
                    .value_name("PERMISSION")
                    .help("Grant a permission to the simulated player (repeatable)")
                    .action(clap::ArgAction::Append),
            )
            .arg(
                Arg::new("admin")
                    .long("admin")
                    .help("Simulate an admin player")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg(
                Arg::new("exec")
                    .short('e')
                    .long("exec")
                    .value_name("ARGS")
                    .help("Dispatch commandbuttons.exec with these arguments (e.g. \"chat /tpa\")"),
            )
            .arg(
                Arg::new("log-level")
                    .short('l')
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level (trace, debug, info, warn, error)"),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Output logs in JSON format")
                    .action(clap::ArgAction::SetTrue),
            )
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config_path: matches
                .get_one::<String>("config")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("CommandButtons.json")),
            grants: matches
                .get_many::<String>("grant")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            admin: matches.get_flag("admin"),
            exec: matches
                .get_one::<String>("exec")
                .map(|raw| raw.split_whitespace().map(str::to_string).collect()),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
        }
    }

    /// Parses the process arguments.
    pub fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    /// Parses an explicit argument list.
    #[cfg(test)]
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::from_matches(&Self::command().try_get_matches_from(args)?))
    }
}
