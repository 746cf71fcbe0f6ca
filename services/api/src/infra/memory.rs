use std::cmp::Reverse;
use std::sync::Arc;

use tokio::sync::RwLock;

use collab_domain::id::{ProfileId, ProjectId, UserId};

use crate::domain::repository::{
    CredentialRepository, IdentityRepository, ProfileRepository, ProjectRepository,
};
use crate::domain::types::{Credential, Identity, Profile, ProfilePatch, ProjectRecord};
use crate::error::{ApiError, msg};

#[derive(Default)]
struct Tables {
    identities: Vec<Identity>,
    credentials: Vec<Credential>,
    profiles: Vec<Profile>,
    projects: Vec<ProjectRecord>,
}

/// Process-local store. Every create checks uniqueness and inserts under one write
/// lock, so concurrent signups for the same email cannot both succeed.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a project row as-is, bypassing the create path. Used to seed rows that
    /// the API itself would never write.
    pub async fn insert_raw_project(&self, record: ProjectRecord) {
        self.tables.write().await.projects.push(record);
    }
}

impl IdentityRepository for MemoryStore {
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, ApiError> {
        let tables = self.tables.read().await;
        Ok(tables.identities.iter().find(|i| i.email == email).cloned())
    }

    async fn find_identity(&self, id: UserId) -> Result<Option<Identity>, ApiError> {
        let tables = self.tables.read().await;
        Ok(tables.identities.iter().find(|i| i.id == id).cloned())
    }

    async fn create_account(
        &self,
        identity: &Identity,
        credential: &Credential,
        profile: &Profile,
    ) -> Result<(), ApiError> {
        let mut tables = self.tables.write().await;
        let taken = tables.identities.iter().any(|i| i.email == identity.email)
            || tables.credentials.iter().any(|c| c.email == credential.email);
        if taken {
            return Err(ApiError::conflict(msg::USER_EXISTS));
        }
        tables.identities.push(identity.clone());
        tables.credentials.push(credential.clone());
        tables.profiles.push(profile.clone());
        Ok(())
    }
}

impl CredentialRepository for MemoryStore {
    async fn find_credential(&self, email: &str) -> Result<Option<Credential>, ApiError> {
        let tables = self.tables.read().await;
        Ok(tables.credentials.iter().find(|c| c.email == email).cloned())
    }
}

impl ProfileRepository for MemoryStore {
    async fn find_profile_by_user(&self, user_id: UserId) -> Result<Option<Profile>, ApiError> {
        let tables = self.tables.read().await;
        Ok(tables.profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn find_profile(&self, id: ProfileId) -> Result<Option<Profile>, ApiError> {
        let tables = self.tables.read().await;
        Ok(tables.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn find_profiles(&self, ids: &[ProfileId]) -> Result<Vec<Profile>, ApiError> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn create_profile(&self, profile: &Profile) -> Result<(), ApiError> {
        let mut tables = self.tables.write().await;
        if tables.profiles.iter().any(|p| p.user_id == profile.user_id) {
            return Err(ApiError::conflict(msg::PROFILE_EXISTS));
        }
        tables.profiles.push(profile.clone());
        Ok(())
    }

    async fn update_profile(&self, id: ProfileId, patch: &ProfilePatch) -> Result<(), ApiError> {
        let mut tables = self.tables.write().await;
        let profile = tables
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::not_found(msg::PROFILE_NOT_FOUND))?;
        profile.apply(patch);
        Ok(())
    }

    async fn scan_profiles(&self, limit: u64) -> Result<Vec<Profile>, ApiError> {
        let tables = self.tables.read().await;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(tables.profiles.iter().take(limit).cloned().collect())
    }
}

impl ProjectRepository for MemoryStore {
    async fn create_project(&self, project: &ProjectRecord) -> Result<(), ApiError> {
        self.tables.write().await.projects.push(project.clone());
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, ApiError> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.projects.iter()))
    }

    async fn list_projects_by_owner(
        &self,
        owner: ProfileId,
    ) -> Result<Vec<ProjectRecord>, ApiError> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables
                .projects
                .iter()
                .filter(|p| p.owner_profile_id == owner),
        ))
    }

    async fn find_project(&self, id: ProjectId) -> Result<Option<ProjectRecord>, ApiError> {
        let tables = self.tables.read().await;
        Ok(tables.projects.iter().find(|p| p.id == id).cloned())
    }
}

/// Newest first, rows without a timestamp last. Ties keep the later insert first.
fn newest_first<'a>(rows: impl DoubleEndedIterator<Item = &'a ProjectRecord>) -> Vec<ProjectRecord> {
    let mut rows: Vec<ProjectRecord> = rows.rev().cloned().collect();
    rows.sort_by_key(|p| (p.created_at.is_none(), Reverse(p.created_at)));
    rows
}
