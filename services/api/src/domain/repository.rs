#![allow(async_fn_in_trait)]

use collab_domain::id::{ProfileId, ProjectId, UserId};

use crate::domain::types::{Credential, Identity, Profile, ProfilePatch, ProjectRecord};
use crate::error::ApiError;

/// Repository for signed-up identities.
pub trait IdentityRepository: Send + Sync {
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, ApiError>;
    async fn find_identity(&self, id: UserId) -> Result<Option<Identity>, ApiError>;

    /// Insert identity, credential and default profile as one unit. A duplicate email
    /// yields `ApiError::Conflict`.
    async fn create_account(
        &self,
        identity: &Identity,
        credential: &Credential,
        profile: &Profile,
    ) -> Result<(), ApiError>;
}

/// Repository for password credentials.
pub trait CredentialRepository: Send + Sync {
    async fn find_credential(&self, email: &str) -> Result<Option<Credential>, ApiError>;
}

/// Repository for profiles.
pub trait ProfileRepository: Send + Sync {
    async fn find_profile_by_user(&self, user_id: UserId) -> Result<Option<Profile>, ApiError>;
    async fn find_profile(&self, id: ProfileId) -> Result<Option<Profile>, ApiError>;
    async fn find_profiles(&self, ids: &[ProfileId]) -> Result<Vec<Profile>, ApiError>;

    /// A second profile for the same identity yields `ApiError::Conflict`.
    async fn create_profile(&self, profile: &Profile) -> Result<(), ApiError>;
    async fn update_profile(&self, id: ProfileId, patch: &ProfilePatch) -> Result<(), ApiError>;

    /// The first `limit` profiles in insertion order.
    async fn scan_profiles(&self, limit: u64) -> Result<Vec<Profile>, ApiError>;
}

/// Repository for projects. Rows come back as stored; callers normalize them.
pub trait ProjectRepository: Send + Sync {
    async fn create_project(&self, project: &ProjectRecord) -> Result<(), ApiError>;

    /// All projects, newest first, rows without a timestamp last.
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, ApiError>;
    async fn list_projects_by_owner(&self, owner: ProfileId)
    -> Result<Vec<ProjectRecord>, ApiError>;
    async fn find_project(&self, id: ProjectId) -> Result<Option<ProjectRecord>, ApiError>;
}

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, ApiError>;

    /// Verify `password` against `hash`. With no hash the call still spends the same
    /// effort and returns `false`.
    async fn verify(&self, password: &str, hash: Option<&str>) -> Result<bool, ApiError>;
}
