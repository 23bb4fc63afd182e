//! Process-wide session state shared with the hosting application.
//!
//! The orchestrator is the only writer. Everyone else reads snapshots.

use std::sync::{PoisonError, RwLock};

use crate::domain::{GateConfig, Workspace};

/// Current gate configuration and committed workspace.
#[derive(Debug, Default)]
pub struct SessionContext {
    gate: RwLock<Option<GateConfig>>,
    workspace: RwLock<Option<Workspace>>,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last fetched gate configuration, if any.
    pub fn gate_config(&self) -> Option<GateConfig> {
        *self.gate.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Workspace the session is bound to, if any.
    pub fn current_workspace(&self) -> Option<Workspace> {
        self.workspace
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_gate_config(&self, config: GateConfig) {
        *self.gate.write().unwrap_or_else(PoisonError::into_inner) = Some(config);
    }

    pub(crate) fn set_current_workspace(&self, workspace: Workspace) {
        *self.workspace.write().unwrap_or_else(PoisonError::into_inner) = Some(workspace);
    }

    /// Forget the committed workspace (sign-out). The gate config stays.
    pub(crate) fn clear(&self) {
        *self.workspace.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
