//! Application layer - use cases and orchestration.
//!
//! This layer contains the workspace resolution rules and the session
//! bootstrap state machine.

pub mod bootstrap;
pub mod context;
pub mod email_sign_in;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_support;

pub use bootstrap::{Collaborators, SessionBootstrap};
pub use context::SessionContext;
pub use email_sign_in::EmailSignIn;
pub use resolver::{resolve_workspace, Resolution};
