use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    TransactionError, TransactionTrait,
    sea_query::{NullOrdering, Order},
};

use collab_api_schema::{credentials, identities, profiles, projects};
use collab_domain::id::{ProfileId, ProjectId, UserId};

use crate::domain::repository::{
    CredentialRepository, IdentityRepository, ProfileRepository, ProjectRepository,
};
use crate::domain::types::{Credential, Identity, Profile, ProfilePatch, ProjectRecord};
use crate::error::{ApiError, msg};

/// Postgres-backed store. Uniqueness is enforced by the indexes created in the
/// migrations; violations surface as `ApiError::Conflict`.
#[derive(Clone)]
pub struct PgStore {
    pub db: DatabaseConnection,
}

impl PgStore {
    pub async fn ping(&self) -> Result<(), ApiError> {
        self.db.ping().await.context("ping database")?;
        Ok(())
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── Identity repository ──────────────────────────────────────────────────────

impl IdentityRepository for PgStore {
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, ApiError> {
        let model = identities::Entity::find()
            .filter(identities::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find identity by email")?;
        Ok(model.map(identity_from_model))
    }

    async fn find_identity(&self, id: UserId) -> Result<Option<Identity>, ApiError> {
        let model = identities::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find identity by id")?;
        Ok(model.map(identity_from_model))
    }

    async fn create_account(
        &self,
        identity: &Identity,
        credential: &Credential,
        profile: &Profile,
    ) -> Result<(), ApiError> {
        let result = self
            .db
            .transaction::<_, (), DbErr>(|txn| {
                let identity = identity.clone();
                let credential = credential.clone();
                let profile = profile.clone();
                Box::pin(async move {
                    insert_identity(txn, &identity).await?;
                    insert_credential(txn, &credential).await?;
                    insert_profile(txn, &profile).await?;
                    Ok(())
                })
            })
            .await;
        match result {
            Ok(()) => Ok(()),
            Err(TransactionError::Transaction(e)) if is_unique_violation(&e) => {
                Err(ApiError::conflict(msg::USER_EXISTS))
            }
            Err(e) => Err(anyhow::Error::new(e).context("create account").into()),
        }
    }
}

async fn insert_identity(txn: &DatabaseTransaction, identity: &Identity) -> Result<(), DbErr> {
    identities::ActiveModel {
        id: Set(identity.id.0),
        email: Set(identity.email.clone()),
        created_at: Set(identity.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn insert_credential(
    txn: &DatabaseTransaction,
    credential: &Credential,
) -> Result<(), DbErr> {
    credentials::ActiveModel {
        user_id: Set(credential.user_id.0),
        email: Set(credential.email.clone()),
        password_hash: Set(credential.password_hash.clone()),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn insert_profile<C: ConnectionTrait>(conn: &C, profile: &Profile) -> Result<(), DbErr> {
    profiles::ActiveModel {
        id: Set(profile.id.0),
        user_id: Set(profile.user_id.0),
        first_name: Set(profile.first_name.clone()),
        last_name: Set(profile.last_name.clone()),
        email: Set(profile.email.clone()),
        bio: Set(profile.bio.clone()),
        location: Set(profile.location.clone()),
        website: Set(profile.website.clone()),
        github: Set(profile.github.clone()),
        linkedin: Set(profile.linkedin.clone()),
        skills: Set(Some(serde_json::json!(profile.skills))),
        avatar: Set(profile.avatar.clone()),
        created_at: Set(profile.created_at),
    }
    .insert(conn)
    .await?;
    Ok(())
}

fn identity_from_model(model: identities::Model) -> Identity {
    Identity {
        id: model.id.into(),
        email: model.email,
        created_at: model.created_at,
    }
}

// ── Credential repository ────────────────────────────────────────────────────

impl CredentialRepository for PgStore {
    async fn find_credential(&self, email: &str) -> Result<Option<Credential>, ApiError> {
        let model = credentials::Entity::find()
            .filter(credentials::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find credential by email")?;
        Ok(model.map(|m| Credential {
            user_id: m.user_id.into(),
            email: m.email,
            password_hash: m.password_hash,
        }))
    }
}

// ── Profile repository ───────────────────────────────────────────────────────

impl ProfileRepository for PgStore {
    async fn find_profile_by_user(&self, user_id: UserId) -> Result<Option<Profile>, ApiError> {
        let model = profiles::Entity::find()
            .filter(profiles::Column::UserId.eq(user_id.0))
            .one(&self.db)
            .await
            .context("find profile by user id")?;
        Ok(model.map(profile_from_model))
    }

    async fn find_profile(&self, id: ProfileId) -> Result<Option<Profile>, ApiError> {
        let model = profiles::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find profile by id")?;
        Ok(model.map(profile_from_model))
    }

    async fn find_profiles(&self, ids: &[ProfileId]) -> Result<Vec<Profile>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = profiles::Entity::find()
            .filter(profiles::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await
            .context("find profiles by ids")?;
        Ok(models.into_iter().map(profile_from_model).collect())
    }

    async fn create_profile(&self, profile: &Profile) -> Result<(), ApiError> {
        match insert_profile(&self.db, profile).await {
            Ok(()) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ApiError::conflict(msg::PROFILE_EXISTS)),
            Err(e) => Err(anyhow::Error::new(e).context("create profile").into()),
        }
    }

    async fn update_profile(&self, id: ProfileId, patch: &ProfilePatch) -> Result<(), ApiError> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut am = profiles::ActiveModel {
            id: Set(id.0),
            ..Default::default()
        };
        if let Some(v) = &patch.first_name {
            am.first_name = Set(v.clone());
        }
        if let Some(v) = &patch.last_name {
            am.last_name = Set(v.clone());
        }
        let optional = [
            (&patch.bio, &mut am.bio),
            (&patch.location, &mut am.location),
            (&patch.website, &mut am.website),
            (&patch.github, &mut am.github),
            (&patch.linkedin, &mut am.linkedin),
            (&patch.avatar, &mut am.avatar),
        ];
        for (value, column) in optional {
            if let Some(v) = value {
                *column = Set(Some(v.clone()));
            }
        }
        if let Some(skills) = &patch.skills {
            am.skills = Set(Some(serde_json::json!(skills)));
        }
        match am.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(ApiError::not_found(msg::PROFILE_NOT_FOUND)),
            Err(e) => Err(anyhow::Error::new(e).context("update profile").into()),
        }
    }

    async fn scan_profiles(&self, limit: u64) -> Result<Vec<Profile>, ApiError> {
        let models = profiles::Entity::find()
            .order_by_asc(profiles::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .context("scan profiles")?;
        Ok(models.into_iter().map(profile_from_model).collect())
    }
}

fn profile_from_model(model: profiles::Model) -> Profile {
    Profile {
        id: model.id.into(),
        user_id: model.user_id.into(),
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        bio: model.bio,
        location: model.location,
        website: model.website,
        github: model.github,
        linkedin: model.linkedin,
        skills: string_list(model.skills).unwrap_or_default(),
        avatar: model.avatar,
        created_at: model.created_at,
    }
}

/// Read a JSON column holding a string array. Non-array values read as absent and
/// non-string elements are skipped.
fn string_list(value: Option<serde_json::Value>) -> Option<Vec<String>> {
    match value? {
        serde_json::Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

// ── Project repository ───────────────────────────────────────────────────────

impl ProjectRepository for PgStore {
    async fn create_project(&self, project: &ProjectRecord) -> Result<(), ApiError> {
        projects::ActiveModel {
            id: Set(project.id.0),
            owner_profile_id: Set(project.owner_profile_id.0),
            title: Set(project.title.clone()),
            description: Set(project.description.clone()),
            tags: Set(project.tags.as_ref().map(|tags| serde_json::json!(tags))),
            status: Set(project.status.clone()),
            max_members: Set(project.max_members),
            current_members: Set(project.current_members),
            repository_url: Set(project.repository_url.clone()),
            contact_info: Set(project.contact_info.clone()),
            created_at: Set(project.created_at),
        }
        .insert(&self.db)
        .await
        .context("create project")?;
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, ApiError> {
        let models = projects::Entity::find()
            .order_by_with_nulls(projects::Column::CreatedAt, Order::Desc, NullOrdering::Last)
            .order_by_desc(projects::Column::Id)
            .all(&self.db)
            .await
            .context("list projects")?;
        Ok(models.into_iter().map(project_from_model).collect())
    }

    async fn list_projects_by_owner(
        &self,
        owner: ProfileId,
    ) -> Result<Vec<ProjectRecord>, ApiError> {
        let models = projects::Entity::find()
            .filter(projects::Column::OwnerProfileId.eq(owner.0))
            .order_by_with_nulls(projects::Column::CreatedAt, Order::Desc, NullOrdering::Last)
            .order_by_desc(projects::Column::Id)
            .all(&self.db)
            .await
            .context("list projects by owner")?;
        Ok(models.into_iter().map(project_from_model).collect())
    }

    async fn find_project(&self, id: ProjectId) -> Result<Option<ProjectRecord>, ApiError> {
        let model = projects::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find project by id")?;
        Ok(model.map(project_from_model))
    }
}

fn project_from_model(model: projects::Model) -> ProjectRecord {
    ProjectRecord {
        id: model.id.into(),
        owner_profile_id: model.owner_profile_id.into(),
        title: model.title,
        description: model.description,
        tags: string_list(model.tags),
        status: model.status,
        max_members: model.max_members,
        current_members: model.current_members,
        repository_url: model.repository_url,
        contact_info: model.contact_info,
        created_at: model.created_at,
    }
}
