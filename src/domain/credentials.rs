//! Typed access to the persisted credentials.
//!
//! The raw store only knows string keys and values; `Credentials` gives
//! every secret its proper type and owns the generate-once rule for the
//! anonymity key.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::error::{AppError, Result};
use super::ports::CredentialStore;

/// Names of the secrets kept in the credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    ApiToken,
    WorkspaceId,
    SignedWithEmail,
    AnonymityKey,
    LastEmailAddress,
}

impl CredentialKey {
    pub const ALL: [Self; 5] = [
        Self::ApiToken,
        Self::WorkspaceId,
        Self::SignedWithEmail,
        Self::AnonymityKey,
        Self::LastEmailAddress,
    ];

    /// Storage name of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiToken => "apiToken",
            Self::WorkspaceId => "workspaceId",
            Self::SignedWithEmail => "signedWithEmail",
            Self::AnonymityKey => "anonymityKey",
            Self::LastEmailAddress => "lastEmailAddress",
        }
    }
}

impl std::fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CredentialKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown credential key: {s}"))
    }
}

/// Presence summary of the stored credentials. Never carries secrets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CredentialSnapshot {
    pub signed_in: bool,
    pub signed_with_email: Option<bool>,
    pub workspace_id: Option<String>,
    pub masked_token: Option<String>,
    pub anonymity_key: Option<String>,
    pub last_email_address: Option<String>,
}

/// Typed credential model over a shared store.
#[derive(Clone)]
pub struct Credentials {
    store: Arc<dyn CredentialStore>,
}

impl Credentials {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Current session token; `None` means signed out.
    pub fn api_token(&self) -> Result<Option<String>> {
        self.store.get(CredentialKey::ApiToken)
    }

    pub fn set_api_token(&self, token: &str) -> Result<()> {
        self.store.set(CredentialKey::ApiToken, token)
    }

    /// Last committed workspace.
    pub fn workspace_id(&self) -> Result<Option<String>> {
        self.store.get(CredentialKey::WorkspaceId)
    }

    pub fn set_workspace_id(&self, workspace_id: &str) -> Result<()> {
        self.store.set(CredentialKey::WorkspaceId, workspace_id)
    }

    pub fn signed_with_email(&self) -> Result<Option<bool>> {
        match self.store.get(CredentialKey::SignedWithEmail)?.as_deref() {
            None => Ok(None),
            Some("true") => Ok(Some(true)),
            Some("false") => Ok(Some(false)),
            Some(other) => Err(AppError::invalid(format!(
                "Unexpected {} value: {other}",
                CredentialKey::SignedWithEmail
            ))),
        }
    }

    pub fn set_signed_with_email(&self, value: bool) -> Result<()> {
        self.store
            .set(CredentialKey::SignedWithEmail, if value { "true" } else { "false" })
    }

    pub fn anonymity_key(&self) -> Result<Option<String>> {
        self.store.get(CredentialKey::AnonymityKey)
    }

    /// Return the anonymity key, generating and storing one if absent.
    ///
    /// An existing key is never overwritten.
    pub fn ensure_anonymity_key(&self) -> Result<String> {
        if let Some(key) = self.anonymity_key()? {
            return Ok(key);
        }

        let key = Uuid::new_v4().to_string();
        self.store.set(CredentialKey::AnonymityKey, &key)?;
        tracing::info!("Generated device anonymity key");

        Ok(key)
    }

    pub fn last_email_address(&self) -> Result<Option<String>> {
        self.store.get(CredentialKey::LastEmailAddress)
    }

    pub fn set_last_email_address(&self, email: &str) -> Result<()> {
        self.store.set(CredentialKey::LastEmailAddress, email)
    }

    /// Forget the session. The remembered workspace, the anonymity key and
    /// the last email address survive.
    pub fn clear_session(&self) -> Result<()> {
        self.store.remove(CredentialKey::ApiToken)?;
        self.store.remove(CredentialKey::SignedWithEmail)
    }

    /// Summarize what is stored without exposing the token.
    pub fn snapshot(&self) -> Result<CredentialSnapshot> {
        let token = self.api_token()?;

        Ok(CredentialSnapshot {
            signed_in: token.is_some(),
            signed_with_email: self.signed_with_email()?,
            workspace_id: self.workspace_id()?,
            masked_token: token.as_deref().map(mask_token),
            anonymity_key: self.anonymity_key()?,
            last_email_address: self.last_email_address()?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").finish_non_exhaustive()
    }
}

/// Keep the last four characters of a token, mask the rest.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}
