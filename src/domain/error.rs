//! Domain-level error types for workspace-session.
//!
//! Library errors are typed with `thiserror`. Failures reported by remote
//! collaborators and terminal bootstrap outcomes are kept separate so the
//! orchestrator can pass backend messages through untouched.

use thiserror::Error;

/// Errors raised by local infrastructure (storage, configuration, IO).
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to open or query the credential database.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input or stored data.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl AppError {
    /// Create a database error from rusqlite error.
    pub fn database(err: rusqlite::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Create an invalid-data error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Transport or server failure reported by a remote collaborator.
///
/// The message is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Why a bootstrap run ended without a committed workspace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootstrapFailure {
    /// Nothing stored yet; the user has to sign in. Expected on first run.
    #[error("No stored credential, sign-in required")]
    NoStoredCredential,

    /// The identity provider finished without handing back a token.
    #[error("Identity provider did not return a token")]
    ProviderTokenMissing,

    /// The account has no workspaces.
    #[error("No workspaces available for this account")]
    NoWorkspaces,

    /// Several workspaces match and the silent flow cannot ask the user.
    #[error("Workspace selection requires user interaction")]
    WorkspaceSelectionRequired,

    /// Backend failure, passed through for display.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The credential store could not be read or written.
    #[error("Credential storage error: {0}")]
    Storage(String),
}

impl From<AppError> for BootstrapFailure {
    fn from(err: AppError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Failures of the magic-link request.
#[derive(Error, Debug)]
pub enum EmailSignInError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Storage(#[from] AppError),
}

impl BootstrapFailure {
    /// Whether this is the expected signed-out state rather than an error.
    #[must_use]
    pub const fn is_sign_in_required(&self) -> bool {
        matches!(self, Self::NoStoredCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_passes_through() {
        let failure = BootstrapFailure::from(BackendError::new("Server is on fire"));
        assert_eq!(failure.to_string(), "Server is on fire");
    }

    #[test]
    fn test_storage_failure_wraps_app_error() {
        let failure = BootstrapFailure::from(AppError::invalid("bad flag"));
        assert_eq!(
            failure,
            BootstrapFailure::Storage("Invalid data: bad flag".into())
        );
        assert!(!failure.is_sign_in_required());
        assert!(BootstrapFailure::NoStoredCredential.is_sign_in_required());
    }
}
