//! Recording fakes for the remote collaborators and the credential store.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    AccentColor, AppError, AuthBackend, AuthenticationOutcome, BackendError, BootstrapObserver,
    BootstrapOutcome, ConfigGate, CredentialKey, CredentialStore, Credentials, GateConfig,
    IdentityProvider, ProviderSignIn, Result as StoreResult, Workspace, WorkspaceBackend,
    WorkspaceSwitch,
};
use crate::infrastructure::SqliteCredentialStore;

pub fn ws(id: &str) -> Workspace {
    Workspace::new(id, format!("Workspace {id}"), AccentColor::default())
}

pub fn outcome(token: &str, workspaces: Vec<Workspace>) -> AuthenticationOutcome {
    AuthenticationOutcome {
        session_token: token.to_string(),
        workspaces,
    }
}

pub fn memory_credentials() -> Credentials {
    Credentials::new(Arc::new(
        SqliteCredentialStore::open_in_memory().unwrap(),
    ))
}

/// One fake standing in for every remote collaborator.
///
/// Every call is logged as `name` or `name:arg`.
pub struct FakeBackend {
    pub gate: Result<GateConfig, BackendError>,
    pub provider: ProviderSignIn,
    pub provider_auth: Result<AuthenticationOutcome, BackendError>,
    pub email_auth: Result<AuthenticationOutcome, BackendError>,
    pub refresh: Result<AuthenticationOutcome, BackendError>,
    pub email_link: Result<(), BackendError>,
    pub list: Result<Vec<Workspace>, BackendError>,
    pub switch_error: Option<BackendError>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            gate: Ok(GateConfig { blocked: false }),
            provider: ProviderSignIn::Token("provider-token".into()),
            provider_auth: Ok(outcome("provider-session", vec![ws("w1")])),
            email_auth: Ok(outcome("email-session", vec![ws("w1")])),
            refresh: Ok(outcome("refreshed-session", vec![ws("w1")])),
            email_link: Ok(()),
            list: Ok(vec![ws("w1"), ws("w2")]),
            switch_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than the gate check.
    pub fn backend_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call != "fetch_config")
            .collect()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl ConfigGate for FakeBackend {
    async fn fetch_config(&self) -> Result<GateConfig, BackendError> {
        self.record("fetch_config");
        self.gate.clone()
    }
}

#[async_trait]
impl AuthBackend for FakeBackend {
    async fn authenticate_with_provider_token(
        &self,
        token: &str,
        push_token: Option<&str>,
    ) -> Result<AuthenticationOutcome, BackendError> {
        self.record(format!(
            "authenticate_with_provider_token:{token}:{}",
            push_token.unwrap_or("-")
        ));
        self.provider_auth.clone()
    }

    async fn authenticate_with_email_link_token(
        &self,
        token: &str,
        push_token: Option<&str>,
    ) -> Result<AuthenticationOutcome, BackendError> {
        self.record(format!(
            "authenticate_with_email_link_token:{token}:{}",
            push_token.unwrap_or("-")
        ));
        self.email_auth.clone()
    }

    async fn refresh(&self, session_token: &str) -> Result<AuthenticationOutcome, BackendError> {
        self.record(format!("refresh:{session_token}"));
        self.refresh.clone()
    }

    async fn request_email_link(&self, email: &str) -> Result<(), BackendError> {
        self.record(format!("request_email_link:{email}"));
        self.email_link.clone()
    }
}

#[async_trait]
impl WorkspaceBackend for FakeBackend {
    async fn list_workspaces(&self, session_token: &str) -> Result<Vec<Workspace>, BackendError> {
        self.record(format!("list_workspaces:{session_token}"));
        self.list.clone()
    }

    async fn switch_workspace(
        &self,
        session_token: &str,
        workspace_id: &str,
    ) -> Result<WorkspaceSwitch, BackendError> {
        self.record(format!("switch_workspace:{session_token}:{workspace_id}"));
        match &self.switch_error {
            Some(err) => Err(err.clone()),
            None => Ok(WorkspaceSwitch {
                new_session_token: format!("{workspace_id}-session"),
            }),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeBackend {
    async fn sign_in(&self) -> ProviderSignIn {
        self.record("provider_sign_in");
        self.provider.clone()
    }
}

/// Observer that keeps every outcome it receives.
#[derive(Default)]
pub struct RecordingObserver {
    outcomes: Mutex<Vec<BootstrapOutcome>>,
}

impl RecordingObserver {
    pub fn outcomes(&self) -> Vec<BootstrapOutcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl BootstrapObserver for RecordingObserver {
    fn on_outcome(&self, outcome: &BootstrapOutcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }
}

/// Credential store that refuses writes to the given keys.
pub struct FailingStore {
    inner: SqliteCredentialStore,
    rejected: Vec<CredentialKey>,
}

impl FailingStore {
    pub fn rejecting(rejected: &[CredentialKey]) -> Self {
        Self {
            inner: SqliteCredentialStore::open_in_memory().unwrap(),
            rejected: rejected.to_vec(),
        }
    }
}

impl CredentialStore for FailingStore {
    fn get(&self, key: CredentialKey) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: CredentialKey, value: &str) -> StoreResult<()> {
        if self.rejected.contains(&key) {
            return Err(AppError::invalid(format!("{key} is read-only")));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: CredentialKey) -> StoreResult<()> {
        self.inner.remove(key)
    }
}
