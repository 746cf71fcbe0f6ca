use chrono::Utc;
use tracing::info;

use collab_domain::id::{ProfileId, UserId};

use crate::domain::repository::{IdentityRepository, ProfileRepository, ProjectRepository};
use crate::domain::types::{Identity, Profile, ProfileFields, ProjectListing, author_name};
use crate::domain::validation::{validate_new_profile, validate_patch};
use crate::error::{ApiError, msg};

/// Return the identity's profile, creating the default one when it has none. A
/// concurrent create for the same identity is resolved by reading the winner back.
pub(crate) async fn ensure_default_profile<R: ProfileRepository>(
    repo: &R,
    identity: &Identity,
) -> Result<Profile, ApiError> {
    if let Some(profile) = repo.find_profile_by_user(identity.id).await? {
        return Ok(profile);
    }
    let profile = Profile::default_for(identity);
    match repo.create_profile(&profile).await {
        Ok(()) => {
            info!(user_id = %identity.id, profile_id = %profile.id, "default profile created");
            Ok(profile)
        }
        Err(ApiError::Conflict(_)) => repo
            .find_profile_by_user(identity.id)
            .await?
            .ok_or_else(|| ApiError::not_found(msg::PROFILE_NOT_FOUND)),
        Err(e) => Err(e),
    }
}

// ── CreateProfile ────────────────────────────────────────────────────────────

pub struct CreateProfileUseCase<R: IdentityRepository + ProfileRepository> {
    pub repo: R,
}

impl<R: IdentityRepository + ProfileRepository> CreateProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: UserId,
        fields: ProfileFields,
    ) -> Result<ProfileId, ApiError> {
        if self.repo.find_profile_by_user(user_id).await?.is_some() {
            return Err(ApiError::conflict(msg::PROFILE_EXISTS));
        }
        let fields = validate_new_profile(fields)?;
        let identity = self
            .repo
            .find_identity(user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized(msg::USER_ID_REQUIRED))?;

        let profile = Profile::from_fields(user_id, Some(identity.email), fields);
        self.repo.create_profile(&profile).await?;
        info!(user_id = %user_id, profile_id = %profile.id, "profile created");
        Ok(profile.id)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> UpdateProfileUseCase<R> {
    pub async fn execute(&self, user_id: UserId, fields: ProfileFields) -> Result<(), ApiError> {
        let patch = validate_patch(fields)?;
        let profile = self
            .repo
            .find_profile_by_user(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found(msg::PROFILE_NOT_FOUND))?;
        if patch.is_empty() {
            return Ok(());
        }
        self.repo.update_profile(profile.id, &patch).await
    }
}

// ── GetOrCreateProfile ───────────────────────────────────────────────────────

pub struct GetOrCreateProfileUseCase<R: IdentityRepository + ProfileRepository> {
    pub repo: R,
}

impl<R: IdentityRepository + ProfileRepository> GetOrCreateProfileUseCase<R> {
    pub async fn execute(&self, user_id: UserId) -> Result<Profile, ApiError> {
        if let Some(profile) = self.repo.find_profile_by_user(user_id).await? {
            return Ok(profile);
        }
        let identity = self
            .repo
            .find_identity(user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized(msg::USER_ID_REQUIRED))?;
        ensure_default_profile(&self.repo, &identity).await
    }
}

// ── GetPublicProfile ─────────────────────────────────────────────────────────

pub struct PublicProfile {
    pub profile: Profile,
    pub projects: Vec<ProjectListing>,
}

pub struct GetPublicProfileUseCase<R: ProfileRepository + ProjectRepository> {
    pub repo: R,
}

impl<R: ProfileRepository + ProjectRepository> GetPublicProfileUseCase<R> {
    pub async fn execute(&self, id: ProfileId) -> Result<PublicProfile, ApiError> {
        let profile = self
            .repo
            .find_profile(id)
            .await?
            .ok_or_else(|| ApiError::not_found(msg::PROFILE_NOT_FOUND))?;
        let now = Utc::now();
        let author = author_name(Some(&profile));
        let projects = self
            .repo
            .list_projects_by_owner(profile.id)
            .await?
            .into_iter()
            .map(|record| ProjectListing {
                project: record.normalize(now),
                author: author.clone(),
            })
            .collect();
        Ok(PublicProfile { profile, projects })
    }
}
