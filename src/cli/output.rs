//! Output formatting for the inspection commands.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use workspace_session::domain::CredentialSnapshot;
use workspace_session::infrastructure::CredentialEntry;

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// JSON for programmatic use.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Use: table, json")),
        }
    }
}

/// Formats the credential snapshot and entry timestamps as a table.
pub fn format_status_table(snapshot: &CredentialSnapshot, entries: &[CredentialEntry]) -> String {
    let mut out = String::new();

    let headline = if snapshot.signed_in {
        "● Signed in".green().bold()
    } else {
        "○ Signed out".yellow().bold()
    };
    out.push_str(&format!("{headline}\n\n"));

    let method = match snapshot.signed_with_email {
        Some(true) => "email link",
        Some(false) => "identity provider",
        None => "-",
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Sign-in method", method]);
    table.add_row(vec![
        "Session token",
        snapshot.masked_token.as_deref().unwrap_or("-"),
    ]);
    table.add_row(vec![
        "Workspace",
        snapshot.workspace_id.as_deref().unwrap_or("-"),
    ]);
    table.add_row(vec![
        "Anonymity key",
        snapshot.anonymity_key.as_deref().unwrap_or("-"),
    ]);
    table.add_row(vec![
        "Last email",
        snapshot.last_email_address.as_deref().unwrap_or("-"),
    ]);
    out.push_str(&table.to_string());

    if !entries.is_empty() {
        let mut updates = Table::new();
        updates.load_preset(UTF8_FULL);
        updates.set_header(vec!["Key", "Updated"]);
        for entry in entries {
            let updated = entry.updated_at.map_or_else(
                || "-".to_string(),
                |dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            );
            updates.add_row(vec![entry.key.clone(), updated]);
        }
        out.push_str("\n\n");
        out.push_str(&updates.to_string());
    }

    out
}

/// Formats the credential snapshot as JSON.
pub fn format_status_json(snapshot: &CredentialSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}
