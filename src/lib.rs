//! Workspace Session - session bootstrap and workspace resolution.
//!
//! Turns stored or freshly obtained credentials into a session bound to a
//! workspace: gate check, credential lookup, refresh or fresh sign-in,
//! workspace disambiguation and commit. Remote systems are reached through
//! the traits in [`domain::ports`].

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{Collaborators, EmailSignIn, SessionBootstrap, SessionContext};
pub use domain::{
    AppError, BootstrapContext, BootstrapFailure, BootstrapOutcome, BootstrapState, Credentials,
    Result, Workspace,
};
