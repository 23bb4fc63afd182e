//! Magic-link sign-in requests.
//!
//! Sending the link is the first half of the email flow; the second half
//! arrives later as `BootstrapContext::EmailLinkConfirmation`.

use std::sync::Arc;

use crate::domain::{AuthBackend, Credentials, EmailSignInError};

/// Requests emailed sign-in links and remembers the address for retries.
pub struct EmailSignIn {
    auth: Arc<dyn AuthBackend>,
    credentials: Credentials,
}

impl EmailSignIn {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthBackend>, credentials: Credentials) -> Self {
        Self { auth, credentials }
    }

    /// Remember `email` and ask the backend to send a link to it.
    ///
    /// # Errors
    /// Returns error if the address is malformed, cannot be stored, or the
    /// backend rejects the request.
    pub async fn request(&self, email: &str) -> Result<(), EmailSignInError> {
        let email = normalize_email(email)?;

        self.credentials.set_last_email_address(&email)?;
        self.send(&email).await
    }

    /// Send another link to the last requested address.
    ///
    /// Returns `Ok(false)` if no address was ever requested.
    ///
    /// # Errors
    /// Returns error if the store cannot be read or the backend fails.
    pub async fn retry(&self) -> Result<bool, EmailSignInError> {
        let Some(email) = self.credentials.last_email_address()? else {
            tracing::debug!("No remembered email address to retry");
            return Ok(false);
        };

        self.send(&email).await?;
        Ok(true)
    }

    async fn send(&self, email: &str) -> Result<(), EmailSignInError> {
        self.auth.request_email_link(email).await?;
        tracing::info!("Sign-in link requested");
        Ok(())
    }
}

fn normalize_email(email: &str) -> Result<String, EmailSignInError> {
    let email = email.trim();

    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());

    if valid {
        Ok(email.to_string())
    } else {
        Err(EmailSignInError::InvalidEmail(email.to_string()))
    }
}
