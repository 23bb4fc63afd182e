//! Session bootstrap orchestration.
//!
//! Runs the gate check, picks an authentication path from the stored
//! credentials and the entry context, resolves the workspace and commits it.
//! Every entry point reports exactly one outcome, both as its return value
//! and to the attached observer (if it is still alive).

use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::domain::{
    AppConfig, AuthBackend, AuthenticationOutcome, BootstrapContext, BootstrapFailure,
    BootstrapObserver, BootstrapOutcome, BootstrapState, ConfigGate, Credentials,
    IdentityProvider, ProviderSignIn, Workspace, WorkspaceBackend,
};

use super::context::SessionContext;
use super::email_sign_in::EmailSignIn;
use super::resolver::{resolve_workspace, Resolution};

/// Remote collaborators used by the orchestrator.
#[derive(Clone)]
pub struct Collaborators {
    pub gate: Arc<dyn ConfigGate>,
    pub auth: Arc<dyn AuthBackend>,
    pub workspaces: Arc<dyn WorkspaceBackend>,
    pub provider: Arc<dyn IdentityProvider>,
}

/// State machine that turns stored or fresh credentials into a session
/// bound to a workspace.
pub struct SessionBootstrap {
    collaborators: Collaborators,
    credentials: Credentials,
    context: Arc<SessionContext>,
    push_token: Option<String>,
    state: Mutex<BootstrapState>,
    observer: Mutex<Option<Weak<dyn BootstrapObserver>>>,
    // Serializes entry points so credential writes stay causally ordered.
    flow: tokio::sync::Mutex<()>,
}

impl SessionBootstrap {
    /// Create an orchestrator in the `Idle` state.
    #[must_use]
    pub fn new(
        collaborators: Collaborators,
        credentials: Credentials,
        context: Arc<SessionContext>,
    ) -> Self {
        Self {
            collaborators,
            credentials,
            context,
            push_token: None,
            state: Mutex::new(BootstrapState::Idle),
            observer: Mutex::new(None),
            flow: tokio::sync::Mutex::new(()),
        }
    }

    /// Push notification token forwarded to the authenticate operations.
    #[must_use]
    pub fn with_push_token(mut self, push_token: Option<String>) -> Self {
        self.push_token = push_token;
        self
    }

    /// Apply the `[session]` settings from the config file.
    #[must_use]
    pub fn with_config(self, config: &AppConfig) -> Self {
        self.with_push_token(config.session.push_token.clone())
    }

    /// Attach an observer. Only a weak reference is kept.
    pub fn set_observer(&self, observer: &Arc<dyn BootstrapObserver>) {
        *self.observer.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(Arc::downgrade(observer));
    }

    pub fn clear_observer(&self) {
        *self.observer.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Snapshot of the current flow state.
    pub fn state(&self) -> BootstrapState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn context(&self) -> &Arc<SessionContext> {
        &self.context
    }

    /// Magic-link request service sharing this orchestrator's backend and store.
    #[must_use]
    pub fn email_sign_in(&self) -> EmailSignIn {
        EmailSignIn::new(
            Arc::clone(&self.collaborators.auth),
            self.credentials.clone(),
        )
    }

    /// Run a full bootstrap for the given entry context.
    pub async fn bootstrap(&self, context: BootstrapContext) -> BootstrapOutcome {
        let _flow = self.flow.lock().await;
        tracing::info!(interactive = context.is_interactive(), "Starting session bootstrap");

        let outcome = self.run_bootstrap(&context).await;
        self.finish(outcome)
    }

    /// Commit a workspace picked from the list presented by the last run.
    ///
    /// Returns `None` (and changes nothing) when no choice is pending or the
    /// id is not part of the presented list.
    pub async fn commit_user_choice(&self, workspace_id: &str) -> Option<BootstrapOutcome> {
        let _flow = self.flow.lock().await;

        let BootstrapState::AwaitingUserChoice(presented) = self.state() else {
            tracing::debug!(workspace_id, "Ignoring workspace choice, none pending");
            return None;
        };

        let Some(workspace) = presented.into_iter().find(|ws| ws.id == workspace_id) else {
            tracing::debug!(workspace_id, "Ignoring workspace choice, not in presented list");
            return None;
        };

        let outcome = match self.credentials.api_token() {
            Ok(Some(token)) => self.commit(&token, workspace).await,
            Ok(None) => BootstrapFailure::NoStoredCredential.into(),
            Err(err) => BootstrapFailure::from(err).into(),
        };

        Some(self.finish(outcome))
    }

    /// Fetch the account's workspaces with the stored token and present them
    /// for manual switching.
    pub async fn reload_workspaces(&self) -> BootstrapOutcome {
        let _flow = self.flow.lock().await;

        let outcome = match self.list_for_switching().await {
            Ok(workspaces) => BootstrapOutcome::AwaitingUserChoice(workspaces),
            Err(failure) => failure.into(),
        };

        self.finish(outcome)
    }

    /// Forget the session and return to `Idle`.
    ///
    /// # Errors
    /// Returns error if the credential store cannot be updated.
    pub async fn sign_out(&self) -> crate::domain::Result<()> {
        let _flow = self.flow.lock().await;

        self.credentials.clear_session()?;
        self.context.clear();
        self.set_state(BootstrapState::Idle);
        tracing::info!("Signed out");

        Ok(())
    }

    async fn run_bootstrap(&self, context: &BootstrapContext) -> BootstrapOutcome {
        if let Err(err) = self.credentials.ensure_anonymity_key() {
            tracing::warn!(error = %err, "Failed to persist anonymity key");
        }

        self.set_state(BootstrapState::CheckingGate);
        let gate = match self.collaborators.gate.fetch_config().await {
            Ok(gate) => gate,
            Err(err) => {
                tracing::warn!(error = %err, "Config gate unavailable");
                return BootstrapFailure::Backend(err).into();
            }
        };
        self.context.set_gate_config(gate);

        if gate.blocked {
            tracing::info!("App version is blocked");
            return BootstrapOutcome::Blocked;
        }

        match self.authenticate(context).await {
            Ok(auth) => self.resolve_and_commit(auth, context.is_interactive()).await,
            Err(failure) => failure.into(),
        }
    }

    /// Pick and run the authentication path for this context.
    async fn authenticate(
        &self,
        context: &BootstrapContext,
    ) -> Result<AuthenticationOutcome, BootstrapFailure> {
        let auth = &self.collaborators.auth;

        if let BootstrapContext::EmailLinkConfirmation(link_token) = context {
            self.set_state(BootstrapState::Authenticating);
            tracing::debug!("Confirming email link");

            let outcome = auth
                .authenticate_with_email_link_token(link_token, self.push_token.as_deref())
                .await?;
            self.store_session(&outcome.session_token, true)?;
            return Ok(outcome);
        }

        self.set_state(BootstrapState::AwaitingCredentialDecision);
        let Some(stored_token) = self.credentials.api_token()? else {
            tracing::info!("No stored credential");
            return Err(BootstrapFailure::NoStoredCredential);
        };

        self.set_state(BootstrapState::Authenticating);
        if self.credentials.signed_with_email()? == Some(true) {
            tracing::debug!("Refreshing email session");
            let outcome = auth.refresh(&stored_token).await?;
            self.store_session(&outcome.session_token, true)?;
            return Ok(outcome);
        }

        tracing::debug!("Requesting identity provider sign-in");
        let provider_token = match self.collaborators.provider.sign_in().await {
            ProviderSignIn::Token(token) if !token.trim().is_empty() => token,
            ProviderSignIn::Token(_) | ProviderSignIn::NoToken => {
                return Err(BootstrapFailure::ProviderTokenMissing);
            }
            ProviderSignIn::Failed(err) => return Err(err.into()),
        };

        let outcome = auth
            .authenticate_with_provider_token(&provider_token, self.push_token.as_deref())
            .await?;
        self.store_session(&outcome.session_token, false)?;
        Ok(outcome)
    }

    async fn resolve_and_commit(
        &self,
        auth: AuthenticationOutcome,
        interactive: bool,
    ) -> BootstrapOutcome {
        self.set_state(BootstrapState::ResolvingWorkspace);

        let remembered = match self.credentials.workspace_id() {
            Ok(remembered) => remembered,
            Err(err) => return BootstrapFailure::from(err).into(),
        };

        match resolve_workspace(&auth.workspaces, remembered.as_deref()) {
            Resolution::NoWorkspace => BootstrapFailure::NoWorkspaces.into(),
            Resolution::Commit(workspace) => self.commit(&auth.session_token, workspace).await,
            Resolution::AskUser(workspaces) if interactive => {
                tracing::info!(count = workspaces.len(), "Workspace choice required");
                BootstrapOutcome::AwaitingUserChoice(workspaces)
            }
            // Silent resume never asks; the host falls back to the login flow.
            Resolution::AskUser(_) => BootstrapFailure::WorkspaceSelectionRequired.into(),
        }
    }

    /// Switch the backend session to `workspace` and persist the result.
    ///
    /// A failed switch leaves the already stored session token in place.
    async fn commit(&self, session_token: &str, workspace: Workspace) -> BootstrapOutcome {
        self.set_state(BootstrapState::Committing);

        let switch = match self
            .collaborators
            .workspaces
            .switch_workspace(session_token, &workspace.id)
            .await
        {
            Ok(switch) => switch,
            Err(err) => {
                tracing::warn!(workspace_id = %workspace.id, error = %err, "Workspace switch failed");
                return BootstrapFailure::Backend(err).into();
            }
        };

        let persisted = self
            .credentials
            .set_api_token(&switch.new_session_token)
            .and_then(|()| self.credentials.set_workspace_id(&workspace.id));
        if let Err(err) = persisted {
            return BootstrapFailure::from(err).into();
        }

        self.context.set_current_workspace(workspace.clone());
        tracing::info!(workspace_id = %workspace.id, "Workspace committed");

        BootstrapOutcome::Succeeded(workspace)
    }

    async fn list_for_switching(&self) -> Result<Vec<Workspace>, BootstrapFailure> {
        let token = self
            .credentials
            .api_token()?
            .ok_or(BootstrapFailure::NoStoredCredential)?;

        self.set_state(BootstrapState::ResolvingWorkspace);
        let workspaces = self.collaborators.workspaces.list_workspaces(&token).await?;

        if workspaces.is_empty() {
            return Err(BootstrapFailure::NoWorkspaces);
        }

        Ok(workspaces)
    }

    fn store_session(
        &self,
        session_token: &str,
        signed_with_email: bool,
    ) -> crate::domain::Result<()> {
        self.credentials.set_api_token(session_token)?;
        self.credentials.set_signed_with_email(signed_with_email)
    }

    fn set_state(&self, state: BootstrapState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Settle into the outcome's state and report it once.
    fn finish(&self, outcome: BootstrapOutcome) -> BootstrapOutcome {
        self.set_state(outcome.to_state());

        let observer = self
            .observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(Weak::upgrade);

        match observer {
            Some(observer) => observer.on_outcome(&outcome),
            None => tracing::debug!("No live observer, outcome only returned"),
        }

        outcome
    }
}
