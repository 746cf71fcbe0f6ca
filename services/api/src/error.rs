use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use collab_core::config::MissingVar;

/// Client-facing messages shared by the use cases and adapters.
pub mod msg {
    pub const CREDENTIALS_REQUIRED: &str = "Email and password are required";
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
    pub const USER_EXISTS: &str = "User with this email already exists";
    pub const USER_ID_REQUIRED: &str = "User ID required";
    pub const PROFILE_EXISTS: &str = "Profile already exists";
    pub const PROFILE_NOT_FOUND: &str = "Profile not found";
    pub const USER_PROFILE_NOT_FOUND: &str = "User profile not found";
    pub const PROJECT_NOT_FOUND: &str = "Project not found";
    pub const TITLE_AND_USER_REQUIRED: &str = "Title and userId are required";
    pub const INVALID_STATUS: &str = "Invalid project status";
    pub const INVALID_SESSION: &str = "Invalid session token";
}

/// API error variants. Each maps to one HTTP status and an `{"error": ...}` body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Configuration(#[from] MissingVar),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Conflict(_) => "CONFLICT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Configuration(_) => "CONFIGURATION",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Configuration(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = ?e, kind = self.kind(), "internal error");
            }
            Self::Configuration(e) => {
                tracing::error!(error = %e, kind = self.kind(), "service not configured");
            }
            _ => tracing::debug!(error = %self, kind = self.kind(), "request rejected"),
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
