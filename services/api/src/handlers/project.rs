use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use collab_domain::id::ProjectId;
use collab_domain::project::ProjectStatus;

use crate::domain::types::ProjectListing;
use crate::error::{ApiError, msg};
use crate::state::AppState;
use crate::usecase::project::{
    CreateProjectInput, CreateProjectUseCase, GetProjectUseCase, ListProjectsUseCase,
};

/// Wire shape of a project listing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub tags: Vec<String>,
    #[serde(serialize_with = "collab_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub status: ProjectStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_members: Option<i32>,
    pub current_members: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    pub contact_info: String,
}

impl From<ProjectListing> for ProjectResponse {
    fn from(ProjectListing { project, author }: ProjectListing) -> Self {
        Self {
            id: project.id.to_string(),
            title: project.title,
            description: project.description,
            author,
            tags: project.tags,
            created_at: project.created_at,
            status: project.status,
            max_members: project.max_members,
            current_members: project.current_members,
            repository_url: project.repository_url,
            contact_info: project.contact_info,
        }
    }
}

// ── GET /projects ────────────────────────────────────────────────────────────

pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let usecase = ListProjectsUseCase { repo: state.store };
    let listings = usecase.execute().await?;
    Ok(Json(listings.into_iter().map(Into::into).collect()))
}

// ── POST /projects ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub max_members: Option<i32>,
    pub current_members: Option<i32>,
    pub repository_url: Option<String>,
    pub contact_info: Option<String>,
}

#[derive(Serialize)]
pub struct CreateProjectResponse {
    pub success: bool,
    pub message: &'static str,
}

pub async fn create_project(
    State(state): State<AppState>,
    body: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<Json<CreateProjectResponse>, ApiError> {
    let Json(body) = body?;
    let usecase = CreateProjectUseCase { repo: state.store };
    usecase
        .execute(CreateProjectInput {
            user_id: body.user_id,
            title: body.title,
            description: body.description,
            status: body.status,
            tags: body.tags,
            max_members: body.max_members,
            current_members: body.current_members,
            repository_url: body.repository_url,
            contact_info: body.contact_info,
        })
        .await?;
    Ok(Json(CreateProjectResponse {
        success: true,
        message: "Project created successfully!",
    }))
}

// ── GET /projects/{id} ───────────────────────────────────────────────────────

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let id: ProjectId = id
        .parse()
        .map_err(|_| ApiError::not_found(msg::PROJECT_NOT_FOUND))?;
    let usecase = GetProjectUseCase { repo: state.store };
    let listing = usecase.execute(id).await?;
    Ok(Json(listing.into()))
}
