//! Password sign-in against the hosted auth service.
//!
//! Signing in stores the session on the shared client, so every table and
//! storage request made afterwards carries the user's access token instead
//! of the anon key.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::client::HttpCore;
use crate::error::BackendError;

/// The signed-in operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Tokens returned by a password grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    pub user: AuthUser,
}

/// Sign-in, sign-out and current-user lookups.
#[derive(Clone)]
pub struct AuthClient {
    core: Arc<HttpCore>,
}

impl AuthClient {
    pub(crate) fn new(core: Arc<HttpCore>) -> Self {
        Self { core }
    }

    /// Exchange email and password for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        let url = self.core.config.auth_url("token?grant_type=password");
        let request = self
            .core
            .request(Method::POST, &url)
            .json(&json!({ "email": email, "password": password }));

        let response = self.core.send(request).await.map_err(|err| {
            warn!(email = %email, error = %err, "Sign-in failed");
            err
        })?;
        let session: Session = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        let user = session.user.clone();
        *self.core.session.write() = Some(session);
        info!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    /// End the session. The local session is dropped even when the server
    /// call fails.
    pub async fn sign_out(&self) -> Result<(), BackendError> {
        if self.core.session.read().is_none() {
            return Ok(());
        }

        let url = self.core.config.auth_url("logout");
        let result = self.core.send(self.core.request(Method::POST, &url)).await;
        *self.core.session.write() = None;

        match result {
            Ok(_) => {
                info!("Signed out");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Sign-out request failed");
                Err(err)
            }
        }
    }

    /// The user the current session belongs to, as the server sees it.
    pub async fn current_user(&self) -> Result<AuthUser, BackendError> {
        if self.core.session.read().is_none() {
            return Err(BackendError::NotSignedIn);
        }

        let url = self.core.config.auth_url("user");
        let response = self.core.send(self.core.request(Method::GET, &url)).await?;
        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    pub fn session(&self) -> Option<Session> {
        self.core.session.read().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.core.session.read().is_some()
    }
}
