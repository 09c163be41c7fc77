//! Session context: the signed-in profile and its lifecycle.
//!
//! An explicit handle passed to the surfaces that need it -- never a
//! process-wide singleton. Lifecycle: `new` → `init` (resume an existing
//! session, if any) → signed in → torn down on sign-out.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::ClientError;
use crate::gateway::AuthApi;
use crate::notices::NoticeSink;
use crate::types::Profile;

/// Holds the current session's profile.
pub struct SessionContext {
    auth: Arc<dyn AuthApi>,
    notices: Arc<dyn NoticeSink>,
    profile: RwLock<Option<Profile>>,
}

impl SessionContext {
    pub fn new(auth: Arc<dyn AuthApi>, notices: Arc<dyn NoticeSink>) -> Self {
        Self {
            auth,
            notices,
            profile: RwLock::new(None),
        }
    }

    /// The signed-in profile, if any.
    pub async fn profile(&self) -> Option<Profile> {
        self.profile.read().await.clone()
    }

    /// Resume an existing session if the backend still has one.
    ///
    /// Failures here degrade to the signed-out state rather than erroring:
    /// an expired session at startup is normal, not exceptional.
    pub async fn init(&self) -> Option<Profile> {
        match self.auth.current_profile().await {
            Ok(profile) => {
                *self.profile.write().await = profile.clone();
                profile
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to resume session");
                *self.profile.write().await = None;
                None
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Profile, ClientError> {
        match self.auth.sign_in(email, password).await {
            Ok(profile) => {
                *self.profile.write().await = Some(profile.clone());
                tracing::info!(user_id = profile.id, "Signed in");
                Ok(profile)
            }
            Err(e) => {
                self.notices.error("Sign-in failed");
                Err(ClientError::Auth(e.to_string()))
            }
        }
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Profile, ClientError> {
        match self.auth.sign_up(email, password, full_name).await {
            Ok(profile) => {
                *self.profile.write().await = Some(profile.clone());
                tracing::info!(user_id = profile.id, "Account created");
                Ok(profile)
            }
            Err(e) => {
                self.notices.error("Registration failed");
                Err(ClientError::Auth(e.to_string()))
            }
        }
    }

    /// Sign out and tear the context down to the signed-out state.
    ///
    /// The local profile is cleared even if the remote call fails -- a
    /// half-signed-out session is worse than a dangling server session.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        let result = self.auth.sign_out().await;
        *self.profile.write().await = None;

        match result {
            Ok(()) => {
                tracing::info!("Signed out");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Remote sign-out failed");
                Err(ClientError::Auth(e.to_string()))
            }
        }
    }
}
