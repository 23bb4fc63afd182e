//! Infrastructure layer - local adapters (credential database, config files).
//!
//! This layer handles all local I/O.

pub mod config;
pub mod credential_store;

pub use config::{
    config_file_path, ensure_config_exists, load_config, load_config_from_file, load_config_in,
    save_config,
};
pub use credential_store::{CredentialEntry, SqliteCredentialStore};
