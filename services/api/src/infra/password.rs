use std::sync::Arc;

use anyhow::Context as _;

use crate::domain::repository::PasswordHasher;
use crate::error::ApiError;

/// bcrypt work factor for stored password hashes.
pub const PASSWORD_HASH_COST: u32 = 12;

/// Hashed once at startup and verified against when an account has no stored
/// hash, so unknown emails cost the same as wrong passwords.
const DUMMY_PASSWORD: &str = "collab-dummy-password";

/// bcrypt-backed [`PasswordHasher`]. All hashing runs on the blocking pool.
#[derive(Clone)]
pub struct BcryptHasher {
    cost: u32,
    dummy_hash: Arc<str>,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Result<Self, bcrypt::BcryptError> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, cost)?;
        Ok(Self {
            cost,
            dummy_hash: dummy_hash.into(),
        })
    }
}

impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<String, ApiError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("join password hash task")?
            .context("hash password")?;
        Ok(hashed)
    }

    async fn verify(&self, password: &str, hash: Option<&str>) -> Result<bool, ApiError> {
        let password = password.to_owned();
        let (target, real) = match hash {
            Some(h) => (Arc::<str>::from(h), true),
            None => (Arc::clone(&self.dummy_hash), false),
        };
        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &target))
            .await
            .context("join password verify task")?;
        match outcome {
            Ok(matched) => Ok(real && matched),
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is unreadable");
                Ok(false)
            }
        }
    }
}
