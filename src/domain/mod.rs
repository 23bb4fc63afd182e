//! Domain layer - core types and collaborator boundaries.
//!
//! This layer holds the data model of a session, the bootstrap states and
//! the traits through which the application layer reaches external systems.

pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod ports;
pub mod state;

pub use config::{AppConfig, PathConfig, SessionConfig};
pub use credentials::{CredentialKey, CredentialSnapshot, Credentials};
pub use error::{AppError, BackendError, BootstrapFailure, EmailSignInError, Result};
pub use models::{AccentColor, AuthenticationOutcome, GateConfig, Workspace, WorkspaceSwitch};
pub use ports::{
    AuthBackend, BootstrapObserver, ConfigGate, CredentialStore, IdentityProvider, ProviderSignIn,
    WorkspaceBackend,
};
pub use state::{BootstrapContext, BootstrapOutcome, BootstrapState};
