//! CLI command definitions for rc-cascade
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Resolve layered application configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration for an application
    Show(ShowArgs),

    /// List candidate config files and whether each one exists
    Sources(SourcesArgs),
}

/// Arguments for the show subcommand
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Application name (path segment and environment prefix)
    #[arg(value_name = "APP")]
    pub app: String,

    /// JSON file holding default values
    #[arg(short, long, value_name = "FILE")]
    pub defaults: Option<PathBuf>,

    /// Print only the value at this dotted key
    #[arg(short, long, value_name = "KEY")]
    pub get: Option<String>,

    /// Output format: pretty (default) or json
    #[arg(short, long, default_value = "pretty", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// The application's own command line, after `--`
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Arguments for the sources subcommand
#[derive(Args, Debug)]
pub struct SourcesArgs {
    /// Application name
    #[arg(value_name = "APP")]
    pub app: String,

    /// The application's own command line, after `--`
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Output format for resolved configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid format '{}'. Valid options: pretty, json",
                s
            )),
        }
    }
}

impl OutputFormat {
    /// Render a value in this format.
    pub fn render(&self, value: &serde_json::Value) -> serde_json::Result<String> {
        match self {
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
            OutputFormat::Json => serde_json::to_string(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_show_forwards_trailing_args() {
        let cli = Cli::parse_from([
            "rc-cascade", "show", "demo", "--get", "db.host", "--", "--port", "9",
        ]);
        match cli.command {
            Command::Show(args) => {
                assert_eq!(args.app, "demo");
                assert_eq!(args.get.as_deref(), Some("db.host"));
                assert_eq!(args.args, ["--port", "9"]);
                assert_eq!(args.format, OutputFormat::Pretty);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
