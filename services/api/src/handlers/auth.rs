use axum::extract::rejection::JsonRejection;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use collab_auth_types::bearer::{BearerToken, MissingBearer};

use crate::error::{ApiError, msg};
use crate::state::AppState;
use crate::usecase::auth::{CheckSessionUseCase, Credentials, SigninUseCase, SignupUseCase};

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<CredentialsRequest> for Credentials {
    fn from(body: CredentialsRequest) -> Self {
        Self {
            email: body.email,
            password: body.password,
        }
    }
}

// ── POST /auth/signup ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SignupResponse {
    pub success: bool,
    pub message: &'static str,
    pub token: String,
}

pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<SignupResponse>, ApiError> {
    let Json(body) = body?;
    let usecase = SignupUseCase {
        repo: state.store,
        hasher: state.hasher,
        sessions: state.sessions,
    };
    let grant = usecase.execute(body.into()).await?;
    Ok(Json(SignupResponse {
        success: true,
        message: "Account created successfully!",
        token: grant.token,
    }))
}

// ── POST /auth/signin ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SigninUser {
    pub id: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct SigninResponse {
    pub success: bool,
    pub message: &'static str,
    pub token: String,
    pub user: SigninUser,
}

pub async fn signin(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<SigninResponse>, ApiError> {
    let Json(body) = body?;
    let usecase = SigninUseCase {
        repo: state.store,
        hasher: state.hasher,
        sessions: state.sessions,
    };
    let grant = usecase.execute(body.into()).await?;
    Ok(Json(SigninResponse {
        success: true,
        message: "Sign in successful!",
        token: grant.token,
        user: SigninUser {
            id: grant.identity.id.to_string(),
            email: grant.identity.email,
        },
    }))
}

// ── GET /auth/session ────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: String,
    pub email: String,
    pub expires_at: u64,
}

pub async fn session(
    State(state): State<AppState>,
    token: Result<BearerToken, MissingBearer>,
) -> Result<Json<SessionResponse>, ApiError> {
    let BearerToken(token) = token.map_err(|_| ApiError::unauthorized(msg::INVALID_SESSION))?;
    let usecase = CheckSessionUseCase {
        repo: state.store,
        sessions: state.sessions,
    };
    let info = usecase.execute(&token).await?;
    Ok(Json(SessionResponse {
        user_id: info.user_id.to_string(),
        email: info.email,
        expires_at: info.expires_at,
    }))
}
