//! Domain models for accounts, workspaces and authentication results.
//!
//! These are immutable values handed back by the remote backends.

use serde::{Deserialize, Serialize};

/// RGB accent color of a workspace, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccentColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl AccentColor {
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl Default for AccentColor {
    fn default() -> Self {
        Self::rgb(0x80, 0x80, 0x80)
    }
}

impl std::str::FromStr for AccentColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("Invalid accent color: {s}. Expected #RRGGBB"));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| format!("Invalid accent color: {s}"))
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for AccentColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccentColor> for String {
    fn from(color: AccentColor) -> Self {
        color.to_string()
    }
}

impl std::fmt::Display for AccentColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// A tenant/account context a session can operate within.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Unique identifier assigned by the backend.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Accent color used when presenting the workspace.
    #[serde(default)]
    pub accent_color: AccentColor,
}

impl Workspace {
    /// Create a new workspace value.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, accent_color: AccentColor) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            accent_color,
        }
    }
}

/// Result of any of the authenticate/refresh backend operations.
///
/// Workspace order is whatever the backend returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationOutcome {
    pub session_token: String,
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
}

/// Remote configuration relevant to session bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GateConfig {
    /// The running app version may not be used.
    pub blocked: bool,
}

/// Response to a successful workspace switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSwitch {
    pub new_session_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_color_parse() {
        let color: AccentColor = "#1A2b3C".parse().unwrap();
        assert_eq!(color, AccentColor::rgb(0x1A, 0x2B, 0x3C));
        assert_eq!(color.to_string(), "#1A2B3C");

        let bare: AccentColor = "ff0000".parse().unwrap();
        assert_eq!(bare, AccentColor::rgb(255, 0, 0));
    }

    #[test]
    fn test_accent_color_rejects_garbage() {
        assert!("#12345".parse::<AccentColor>().is_err());
        assert!("#GG0000".parse::<AccentColor>().is_err());
        assert!("#ééé".parse::<AccentColor>().is_err());
        assert!("##FF0000".parse::<AccentColor>().is_err());
    }

    #[test]
    fn test_workspace_deserializes_backend_payload() {
        let json = r##"{"id":"w1","title":"Design","accentColor":"#336699"}"##;
        let ws: Workspace = serde_json::from_str(json).unwrap();

        assert_eq!(ws.id, "w1");
        assert_eq!(ws.accent_color, AccentColor::rgb(0x33, 0x66, 0x99));
    }

    #[test]
    fn test_authentication_outcome_defaults_to_no_workspaces() {
        let outcome: AuthenticationOutcome =
            serde_json::from_str(r#"{"sessionToken":"tok"}"#).unwrap();
        assert!(outcome.workspaces.is_empty());
    }
}
