use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use collab_domain::id::{ProfileId, UserId};

use crate::domain::types::{Profile, ProfileFields};
use crate::error::{ApiError, msg};
use crate::handlers::project::ProjectResponse;
use crate::state::AppState;
use crate::usecase::profile::{
    CreateProfileUseCase, GetOrCreateProfileUseCase, GetPublicProfileUseCase,
    UpdateProfileUseCase,
};

/// Missing, empty and non-UUID ids are all reported as a missing user id.
pub(crate) fn require_user_id(raw: Option<&str>) -> Result<UserId, ApiError> {
    raw.filter(|v| !v.trim().is_empty())
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| ApiError::unauthorized(msg::USER_ID_REQUIRED))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub user_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub skills: Option<Vec<String>>,
    pub avatar: Option<String>,
}

impl ProfileRequest {
    fn into_parts(self) -> (Option<String>, ProfileFields) {
        let fields = ProfileFields {
            first_name: self.first_name,
            last_name: self.last_name,
            bio: self.bio,
            location: self.location,
            website: self.website,
            github: self.github,
            linkedin: self.linkedin,
            skills: self.skills,
            avatar: self.avatar,
        };
        (self.user_id, fields)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(serialize_with = "collab_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id.to_string(),
            user_id: p.user_id.to_string(),
            first_name: p.first_name,
            last_name: p.last_name,
            email: p.email,
            bio: p.bio,
            location: p.location,
            website: p.website,
            github: p.github,
            linkedin: p.linkedin,
            skills: p.skills,
            avatar: p.avatar,
            created_at: p.created_at,
        }
    }
}

// ── POST /profile ────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileResponse {
    pub success: bool,
    pub profile_id: String,
    pub message: &'static str,
}

pub async fn create_profile(
    State(state): State<AppState>,
    body: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<CreateProfileResponse>, ApiError> {
    let Json(body) = body?;
    let (user_id, fields) = body.into_parts();
    let user_id = require_user_id(user_id.as_deref())?;
    let usecase = CreateProfileUseCase { repo: state.store };
    let profile_id = usecase.execute(user_id, fields).await?;
    Ok(Json(CreateProfileResponse {
        success: true,
        profile_id: profile_id.to_string(),
        message: "Profile created successfully",
    }))
}

// ── PUT /profile ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UpdateProfileResponse {
    pub success: bool,
}

pub async fn update_profile(
    State(state): State<AppState>,
    body: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    let Json(body) = body?;
    let (user_id, fields) = body.into_parts();
    let user_id = require_user_id(user_id.as_deref())?;
    let usecase = UpdateProfileUseCase { repo: state.store };
    usecase.execute(user_id, fields).await?;
    Ok(Json(UpdateProfileResponse { success: true }))
}

// ── GET /profile?userId= ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileQuery {
    pub user_id: Option<String>,
}

pub async fn get_profile(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user_id = require_user_id(query.user_id.as_deref())?;
    let usecase = GetOrCreateProfileUseCase { repo: state.store };
    let profile = usecase.execute(user_id).await?;
    Ok(Json(profile.into()))
}

// ── GET /profiles/{id} ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PublicProfileResponse {
    pub profile: ProfileResponse,
    pub projects: Vec<ProjectResponse>,
}

pub async fn get_public_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PublicProfileResponse>, ApiError> {
    let id: ProfileId = id
        .parse()
        .map_err(|_| ApiError::not_found(msg::PROFILE_NOT_FOUND))?;
    let usecase = GetPublicProfileUseCase { repo: state.store };
    let view = usecase.execute(id).await?;
    Ok(Json(PublicProfileResponse {
        profile: view.profile.into(),
        projects: view.projects.into_iter().map(Into::into).collect(),
    }))
}
