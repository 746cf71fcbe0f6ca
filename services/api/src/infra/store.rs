use anyhow::Context as _;
use sea_orm::Database;

use collab_api_migration::{Migrator, MigratorTrait as _};
use collab_core::config::MissingVar;
use collab_domain::id::{ProfileId, ProjectId, UserId};

use crate::config::{ApiConfig, StorageBackend};
use crate::domain::repository::{
    CredentialRepository, IdentityRepository, ProfileRepository, ProjectRepository,
};
use crate::domain::types::{Credential, Identity, Profile, ProfilePatch, ProjectRecord};
use crate::error::ApiError;
use crate::infra::db::PgStore;
use crate::infra::memory::MemoryStore;

/// The store adapter selected at startup. `Unconfigured` stands in when a required
/// variable is missing and answers every call with a configuration error.
#[derive(Clone)]
pub enum Store {
    Postgres(PgStore),
    Memory(MemoryStore),
    Unconfigured(MissingVar),
}

impl Store {
    pub async fn connect(config: &ApiConfig) -> anyhow::Result<Self> {
        match config.storage_backend {
            StorageBackend::Memory => {
                tracing::info!("using in-memory store");
                Ok(Self::Memory(MemoryStore::new()))
            }
            StorageBackend::Postgres => {
                let url = match config.database_url() {
                    Ok(url) => url,
                    Err(missing) => {
                        tracing::warn!(error = %missing, "store unconfigured");
                        return Ok(Self::Unconfigured(missing));
                    }
                };
                let db = Database::connect(url)
                    .await
                    .context("connect to database")?;
                if config.run_migrations {
                    Migrator::up(&db, None).await.context("run migrations")?;
                    tracing::info!("migrations applied");
                }
                Ok(Self::Postgres(PgStore { db }))
            }
        }
    }

    /// Ok when the backing store can serve requests.
    pub async fn ready(&self) -> Result<(), ApiError> {
        match self {
            Self::Postgres(pg) => pg.ping().await,
            Self::Memory(_) => Ok(()),
            Self::Unconfigured(missing) => Err((*missing).into()),
        }
    }

    pub async fn close(self) -> anyhow::Result<()> {
        if let Self::Postgres(pg) = self {
            pg.db.close().await.context("close database")?;
        }
        Ok(())
    }
}

macro_rules! dispatch {
    ($self:ident, $store:ident => $call:expr) => {
        match $self {
            Store::Postgres($store) => $call,
            Store::Memory($store) => $call,
            Store::Unconfigured(missing) => Err(ApiError::from(*missing)),
        }
    };
}

impl IdentityRepository for Store {
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, ApiError> {
        dispatch!(self, s => s.find_identity_by_email(email).await)
    }

    async fn find_identity(&self, id: UserId) -> Result<Option<Identity>, ApiError> {
        dispatch!(self, s => s.find_identity(id).await)
    }

    async fn create_account(
        &self,
        identity: &Identity,
        credential: &Credential,
        profile: &Profile,
    ) -> Result<(), ApiError> {
        dispatch!(self, s => s.create_account(identity, credential, profile).await)
    }
}

impl CredentialRepository for Store {
    async fn find_credential(&self, email: &str) -> Result<Option<Credential>, ApiError> {
        dispatch!(self, s => s.find_credential(email).await)
    }
}

impl ProfileRepository for Store {
    async fn find_profile_by_user(&self, user_id: UserId) -> Result<Option<Profile>, ApiError> {
        dispatch!(self, s => s.find_profile_by_user(user_id).await)
    }

    async fn find_profile(&self, id: ProfileId) -> Result<Option<Profile>, ApiError> {
        dispatch!(self, s => s.find_profile(id).await)
    }

    async fn find_profiles(&self, ids: &[ProfileId]) -> Result<Vec<Profile>, ApiError> {
        dispatch!(self, s => s.find_profiles(ids).await)
    }

    async fn create_profile(&self, profile: &Profile) -> Result<(), ApiError> {
        dispatch!(self, s => s.create_profile(profile).await)
    }

    async fn update_profile(&self, id: ProfileId, patch: &ProfilePatch) -> Result<(), ApiError> {
        dispatch!(self, s => s.update_profile(id, patch).await)
    }

    async fn scan_profiles(&self, limit: u64) -> Result<Vec<Profile>, ApiError> {
        dispatch!(self, s => s.scan_profiles(limit).await)
    }
}

impl ProjectRepository for Store {
    async fn create_project(&self, project: &ProjectRecord) -> Result<(), ApiError> {
        dispatch!(self, s => s.create_project(project).await)
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, ApiError> {
        dispatch!(self, s => s.list_projects().await)
    }

    async fn list_projects_by_owner(
        &self,
        owner: ProfileId,
    ) -> Result<Vec<ProjectRecord>, ApiError> {
        dispatch!(self, s => s.list_projects_by_owner(owner).await)
    }

    async fn find_project(&self, id: ProjectId) -> Result<Option<ProjectRecord>, ApiError> {
        dispatch!(self, s => s.find_project(id).await)
    }
}
