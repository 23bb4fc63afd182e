//! Workspace Session - inspect and manage the locally stored session.
//!
//!   workspace-session status            # What is stored (tokens masked)
//!   workspace-session sign-out          # Forget the session token
//!   workspace-session anonymity-key     # Print the device key
//!   workspace-session paths             # Config and credential locations

mod cli;

use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::output::{format_status_json, format_status_table, OutputFormat};
use cli::{Cli, Commands};
use workspace_session::domain::{self, AppConfig, AppError, Credentials};
use workspace_session::infrastructure::{
    ensure_config_exists, load_config_in, SqliteCredentialStore,
};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> domain::Result<()> {
    let format = cli
        .output_format()
        .map_err(|message| AppError::Config { message })?;

    let config = load_config_in(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Status => cmd_status(&config, format)?,
        Commands::SignOut => cmd_sign_out(&config)?,
        Commands::AnonymityKey => cmd_anonymity_key(&config)?,
        Commands::Paths => cmd_paths(&config),
        Commands::InitConfig => cmd_init_config(&config)?,
    }

    Ok(())
}

fn open_store(config: &AppConfig) -> domain::Result<Arc<SqliteCredentialStore>> {
    SqliteCredentialStore::open(&config.credentials_path()).map(Arc::new)
}

/// Show stored session state.
fn cmd_status(config: &AppConfig, format: OutputFormat) -> domain::Result<()> {
    let store = open_store(config)?;
    let credentials = Credentials::new(store.clone());
    let snapshot = credentials.snapshot()?;

    let output = match format {
        OutputFormat::Table => format_status_table(&snapshot, &store.entries()?),
        OutputFormat::Json => format_status_json(&snapshot)
            .map_err(|e| AppError::invalid(format!("Failed to encode status: {e}")))?,
    };

    println!("{output}");
    Ok(())
}

/// Forget the stored session token.
fn cmd_sign_out(config: &AppConfig) -> domain::Result<()> {
    let credentials = Credentials::new(open_store(config)?);

    if credentials.api_token()?.is_none() {
        println!("{} Already signed out", "○".yellow());
        return Ok(());
    }

    credentials.clear_session()?;
    println!("{} Signed out", "✓".green().bold());
    Ok(())
}

/// Print the device anonymity key.
fn cmd_anonymity_key(config: &AppConfig) -> domain::Result<()> {
    let credentials = Credentials::new(open_store(config)?);
    println!("{}", credentials.ensure_anonymity_key()?);
    Ok(())
}

/// Show file locations.
fn cmd_paths(config: &AppConfig) {
    println!("{}", "📂 Workspace Session Paths".bold());
    println!();
    println!("  config:      {}", config.config_file_path().display());
    println!("  credentials: {}", config.credentials_path().display());
}

/// Write the default config file.
fn cmd_init_config(config: &AppConfig) -> domain::Result<()> {
    let path = config.config_file_path();

    if ensure_config_exists(&path)? {
        println!("{} Created {}", "✓".green().bold(), path.display());
    } else {
        println!("{} Config already exists at {}", "○".yellow(), path.display());
    }

    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
