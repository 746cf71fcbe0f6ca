use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use crate::domain::types::Profile;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::search::SearchUsersUseCase;

// ── GET /users/search?q= ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchResult {
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
    pub avatar: Option<String>,
    pub skills: Vec<String>,
}

impl From<Profile> for UserSearchResult {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id.to_string(),
            user_id: p.user_id.to_string(),
            first_name: p.first_name,
            last_name: p.last_name,
            email: p.email,
            bio: p.bio,
            location: p.location,
            avatar: p.avatar,
            skills: p.skills,
        }
    }
}

/// An unreadable query string searches for nothing.
pub async fn search_users(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<UserSearchResult>>, ApiError> {
    let q = query.ok().and_then(|Query(query)| query.q).unwrap_or_default();
    let usecase = SearchUsersUseCase { repo: state.store };
    let profiles = usecase.execute(&q).await?;
    Ok(Json(profiles.into_iter().map(Into::into).collect()))
}
