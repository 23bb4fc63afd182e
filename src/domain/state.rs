//! Bootstrap flow states and outcomes.

use super::error::BootstrapFailure;
use super::models::Workspace;

/// How a bootstrap run was triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapContext {
    /// Cold start; never asks the user anything.
    SilentResume,
    /// Login screen; may present a workspace choice.
    InteractiveResume,
    /// The user opened an emailed magic link carrying this token.
    EmailLinkConfirmation(String),
}

impl BootstrapContext {
    /// Whether the hosting flow can present a workspace choice.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        !matches!(self, Self::SilentResume)
    }
}

/// Where a bootstrap run currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BootstrapState {
    #[default]
    Idle,
    CheckingGate,
    Blocked,
    AwaitingCredentialDecision,
    Authenticating,
    ResolvingWorkspace,
    AwaitingUserChoice(Vec<Workspace>),
    Committing,
    Succeeded,
    Failed(BootstrapFailure),
}

impl BootstrapState {
    /// Whether the run has finished (successfully or not).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Blocked | Self::Succeeded | Self::Failed(_))
    }
}

/// What a bootstrap entry point reports to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The app version is blocked; the user must update.
    Blocked,
    /// A workspace was committed.
    Succeeded(Workspace),
    /// Several workspaces, none remembered; waiting for `commit_user_choice`.
    AwaitingUserChoice(Vec<Workspace>),
    Failed(BootstrapFailure),
}

impl BootstrapOutcome {
    /// The state the orchestrator settles in after reporting this outcome.
    #[must_use]
    pub fn to_state(&self) -> BootstrapState {
        match self {
            Self::Blocked => BootstrapState::Blocked,
            Self::Succeeded(_) => BootstrapState::Succeeded,
            Self::AwaitingUserChoice(list) => BootstrapState::AwaitingUserChoice(list.clone()),
            Self::Failed(reason) => BootstrapState::Failed(reason.clone()),
        }
    }
}

impl From<BootstrapFailure> for BootstrapOutcome {
    fn from(failure: BootstrapFailure) -> Self {
        Self::Failed(failure)
    }
}
