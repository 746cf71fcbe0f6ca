use std::collections::HashMap;

use chrono::Utc;
use tracing::info;

use collab_domain::id::{ProfileId, ProjectId, UserId};
use collab_domain::project::ProjectStatus;

use crate::domain::repository::{ProfileRepository, ProjectRepository};
use crate::domain::types::{ProjectListing, ProjectRecord, author_name};
use crate::error::{ApiError, msg};

// ── CreateProject ────────────────────────────────────────────────────────────

/// Project fields as submitted. `user_id` is the caller's identity id.
#[derive(Debug, Default)]
pub struct CreateProjectInput {
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub max_members: Option<i32>,
    pub current_members: Option<i32>,
    pub repository_url: Option<String>,
    pub contact_info: Option<String>,
}

pub struct CreateProjectUseCase<R: ProfileRepository + ProjectRepository> {
    pub repo: R,
}

impl<R: ProfileRepository + ProjectRepository> CreateProjectUseCase<R> {
    pub async fn execute(&self, input: CreateProjectInput) -> Result<ProjectId, ApiError> {
        let title = input.title.as_deref().filter(|t| !t.trim().is_empty());
        let user_id = input.user_id.as_deref().filter(|u| !u.is_empty());
        let (Some(title), Some(user_id)) = (title, user_id) else {
            return Err(ApiError::validation(msg::TITLE_AND_USER_REQUIRED));
        };
        let status = match non_empty(input.status) {
            Some(s) => Some(
                s.parse::<ProjectStatus>()
                    .map_err(|_| ApiError::validation(msg::INVALID_STATUS))?,
            ),
            None => None,
        };

        let user_id: UserId = user_id
            .parse()
            .map_err(|_| ApiError::not_found(msg::USER_PROFILE_NOT_FOUND))?;
        let owner = self
            .repo
            .find_profile_by_user(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found(msg::USER_PROFILE_NOT_FOUND))?;

        let record = ProjectRecord {
            id: ProjectId::generate(),
            owner_profile_id: owner.id,
            title: title.to_owned(),
            description: Some(input.description.unwrap_or_default()),
            tags: input.tags.filter(|t| !t.is_empty()),
            status: status.map(|s| s.as_str().to_owned()),
            max_members: input.max_members,
            current_members: Some(input.current_members.filter(|n| *n != 0).unwrap_or(1)),
            repository_url: non_empty(input.repository_url),
            contact_info: non_empty(input.contact_info),
            created_at: Some(Utc::now()),
        };
        self.repo.create_project(&record).await?;
        info!(project_id = %record.id, owner_profile_id = %owner.id, "project created");
        Ok(record.id)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ── ListProjects ─────────────────────────────────────────────────────────────

pub struct ListProjectsUseCase<R: ProfileRepository + ProjectRepository> {
    pub repo: R,
}

impl<R: ProfileRepository + ProjectRepository> ListProjectsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<ProjectListing>, ApiError> {
        let records = self.repo.list_projects().await?;

        let mut owner_ids: Vec<ProfileId> = records.iter().map(|r| r.owner_profile_id).collect();
        owner_ids.sort_unstable_by_key(|id| id.0);
        owner_ids.dedup();
        let owners: HashMap<ProfileId, _> = self
            .repo
            .find_profiles(&owner_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let now = Utc::now();
        Ok(records
            .into_iter()
            .map(|record| {
                let author = author_name(owners.get(&record.owner_profile_id));
                ProjectListing {
                    project: record.normalize(now),
                    author,
                }
            })
            .collect())
    }
}

// ── GetProject ───────────────────────────────────────────────────────────────

pub struct GetProjectUseCase<R: ProfileRepository + ProjectRepository> {
    pub repo: R,
}

impl<R: ProfileRepository + ProjectRepository> GetProjectUseCase<R> {
    pub async fn execute(&self, id: ProjectId) -> Result<ProjectListing, ApiError> {
        let record = self
            .repo
            .find_project(id)
            .await?
            .ok_or_else(|| ApiError::not_found(msg::PROJECT_NOT_FOUND))?;
        let owner = self.repo.find_profile(record.owner_profile_id).await?;
        Ok(ProjectListing {
            author: author_name(owner.as_ref()),
            project: record.normalize(Utc::now()),
        })
    }
}
