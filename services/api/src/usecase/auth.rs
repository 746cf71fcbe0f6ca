use tracing::info;

use collab_auth_types::token::SessionInfo;

use crate::domain::repository::{
    CredentialRepository, IdentityRepository, PasswordHasher, ProfileRepository,
};
use crate::domain::types::{Credential, Identity, Profile};
use crate::domain::validation::check_password;
use crate::error::{ApiError, msg};
use crate::infra::session::SessionSigner;
use crate::usecase::profile::ensure_default_profile;

pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Trimmed, lower-cased email and the raw password. Either one missing or empty is
    /// a validation error.
    fn require(self) -> Result<(String, String), ApiError> {
        let email = self
            .email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());
        let password = self.password.filter(|p| !p.is_empty());
        match (email, password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(ApiError::validation(msg::CREDENTIALS_REQUIRED)),
        }
    }
}

pub struct SessionGrant {
    pub token: String,
    pub identity: Identity,
}

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupUseCase<R: IdentityRepository, H: PasswordHasher> {
    pub repo: R,
    pub hasher: H,
    pub sessions: SessionSigner,
}

impl<R: IdentityRepository, H: PasswordHasher> SignupUseCase<R, H> {
    pub async fn execute(&self, input: Credentials) -> Result<SessionGrant, ApiError> {
        let (email, password) = input.require()?;
        check_password(&password)?;
        self.sessions.ensure_configured()?;

        if self.repo.find_identity_by_email(&email).await?.is_some() {
            return Err(ApiError::conflict(msg::USER_EXISTS));
        }

        let password_hash = self.hasher.hash(&password).await?;
        let identity = Identity::new(email);
        let credential = Credential {
            user_id: identity.id,
            email: identity.email.clone(),
            password_hash,
        };
        let profile = Profile::default_for(&identity);
        self.repo
            .create_account(&identity, &credential, &profile)
            .await?;
        info!(user_id = %identity.id, profile_id = %profile.id, "account created");

        let token = self.sessions.issue(&identity)?;
        Ok(SessionGrant { token, identity })
    }
}

// ── Signin ───────────────────────────────────────────────────────────────────

pub struct SigninUseCase<R, H>
where
    R: IdentityRepository + CredentialRepository + ProfileRepository,
    H: PasswordHasher,
{
    pub repo: R,
    pub hasher: H,
    pub sessions: SessionSigner,
}

impl<R, H> SigninUseCase<R, H>
where
    R: IdentityRepository + CredentialRepository + ProfileRepository,
    H: PasswordHasher,
{
    /// Every failure path runs exactly one password verification and returns the
    /// same error, so callers cannot tell unknown emails from wrong passwords.
    pub async fn execute(&self, input: Credentials) -> Result<SessionGrant, ApiError> {
        let (email, password) = input.require()?;
        self.sessions.ensure_configured()?;

        let identity = self.repo.find_identity_by_email(&email).await?;
        let credential = self.repo.find_credential(&email).await?;
        let matched = self
            .hasher
            .verify(
                &password,
                credential.as_ref().map(|c| c.password_hash.as_str()),
            )
            .await?;

        let identity = match (identity, credential) {
            (Some(identity), Some(credential)) if matched && credential.user_id == identity.id => {
                identity
            }
            _ => return Err(ApiError::unauthorized(msg::INVALID_CREDENTIALS)),
        };

        ensure_default_profile(&self.repo, &identity).await?;
        let token = self.sessions.issue(&identity)?;
        Ok(SessionGrant { token, identity })
    }
}

// ── CheckSession ─────────────────────────────────────────────────────────────

pub struct CheckSessionUseCase<R: IdentityRepository> {
    pub repo: R,
    pub sessions: SessionSigner,
}

impl<R: IdentityRepository> CheckSessionUseCase<R> {
    pub async fn execute(&self, token: &str) -> Result<SessionInfo, ApiError> {
        let info = self.sessions.check(token)?;
        if self.repo.find_identity(info.user_id).await?.is_none() {
            return Err(ApiError::unauthorized(msg::INVALID_SESSION));
        }
        Ok(info)
    }
}
