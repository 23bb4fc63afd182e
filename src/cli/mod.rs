//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for inspecting the local
//! session state.

pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use output::OutputFormat;

/// Workspace Session - inspect and manage the locally stored session.
#[derive(Parser, Debug)]
#[command(name = "workspace-session")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format: table or json.
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Override the data directory from the config file.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show what is stored (tokens are masked).
    Status,

    /// Forget the session token. The remembered workspace is kept.
    SignOut,

    /// Print the device anonymity key, generating it if needed.
    AnonymityKey,

    /// Show the config and credential file locations.
    Paths,

    /// Write a default config file if none exists.
    InitConfig,
}

impl Cli {
    /// Parse the output format argument.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.format.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_with_flags() {
        let cli = Cli::try_parse_from([
            "workspace-session",
            "-vv",
            "--format",
            "json",
            "--data-dir",
            "/tmp/session",
            "status",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Status));
        assert!(matches!(cli.output_format(), Ok(OutputFormat::Json)));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/session")));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let cli = Cli::try_parse_from(["workspace-session", "-f", "xml", "paths"]).unwrap();
        assert!(cli.output_format().is_err());
    }
}
