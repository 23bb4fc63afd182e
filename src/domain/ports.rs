//! Boundaries to external collaborators.
//!
//! The orchestrator only talks to the outside world through these traits.
//! Network-facing ones are async; the credential store is a small
//! synchronous key-value interface.

use async_trait::async_trait;

use super::credentials::CredentialKey;
use super::error::{BackendError, Result};
use super::models::{AuthenticationOutcome, GateConfig, Workspace, WorkspaceSwitch};
use super::state::BootstrapOutcome;

/// Remote kill-switch / version gate.
#[async_trait]
pub trait ConfigGate: Send + Sync {
    async fn fetch_config(&self) -> std::result::Result<GateConfig, BackendError>;
}

/// Token exchange endpoints.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange an identity-provider token for a session.
    async fn authenticate_with_provider_token(
        &self,
        token: &str,
        push_token: Option<&str>,
    ) -> std::result::Result<AuthenticationOutcome, BackendError>;

    /// Exchange the token from an emailed magic link for a session.
    async fn authenticate_with_email_link_token(
        &self,
        token: &str,
        push_token: Option<&str>,
    ) -> std::result::Result<AuthenticationOutcome, BackendError>;

    /// Refresh a stored session token.
    async fn refresh(
        &self,
        session_token: &str,
    ) -> std::result::Result<AuthenticationOutcome, BackendError>;

    /// Ask the backend to email a magic link.
    async fn request_email_link(&self, email: &str) -> std::result::Result<(), BackendError>;
}

/// Workspace listing and switching.
#[async_trait]
pub trait WorkspaceBackend: Send + Sync {
    async fn list_workspaces(
        &self,
        session_token: &str,
    ) -> std::result::Result<Vec<Workspace>, BackendError>;

    async fn switch_workspace(
        &self,
        session_token: &str,
        workspace_id: &str,
    ) -> std::result::Result<WorkspaceSwitch, BackendError>;
}

/// Single-shot result of an interactive identity-provider sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSignIn {
    Token(String),
    NoToken,
    Failed(BackendError),
}

/// External identity provider (interactive, may suspend for a long time).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self) -> ProviderSignIn;
}

/// Persistent store for a small set of named secrets.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: CredentialKey) -> Result<Option<String>>;
    fn set(&self, key: CredentialKey, value: &str) -> Result<()>;
    fn remove(&self, key: CredentialKey) -> Result<()>;
}

/// Receives bootstrap results. Owned by the hosting screen.
pub trait BootstrapObserver: Send + Sync {
    fn on_outcome(&self, outcome: &BootstrapOutcome);
}
