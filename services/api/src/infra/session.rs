use std::sync::Arc;

use anyhow::Context as _;

use collab_auth_types::token::{SessionInfo, issue_session_token, validate_session_token};
use collab_core::config::{MissingVar, require};

use crate::domain::types::Identity;
use crate::error::{ApiError, msg};

/// Issues and checks session tokens. Without `JWT_SECRET` every call fails with a
/// configuration error instead of signing with an empty key.
#[derive(Clone)]
pub struct SessionSigner {
    secret: Result<Arc<str>, MissingVar>,
}

impl SessionSigner {
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            secret: require(secret, "JWT_SECRET").map(Arc::from),
        }
    }

    pub fn ensure_configured(&self) -> Result<(), ApiError> {
        self.secret()?;
        Ok(())
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, ApiError> {
        let (token, _exp) = issue_session_token(identity.id, &identity.email, self.secret()?)
            .context("sign session token")?;
        Ok(token)
    }

    pub fn check(&self, token: &str) -> Result<SessionInfo, ApiError> {
        validate_session_token(token, self.secret()?).map_err(|e| {
            tracing::debug!(error = %e, "session token rejected");
            ApiError::unauthorized(msg::INVALID_SESSION)
        })
    }

    fn secret(&self) -> Result<&str, ApiError> {
        match &self.secret {
            Ok(secret) => Ok(secret.as_ref()),
            Err(missing) => Err((*missing).into()),
        }
    }
}
