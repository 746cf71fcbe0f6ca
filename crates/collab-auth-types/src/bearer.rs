//! `Authorization: Bearer <token>` extractor.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::request::Parts;

/// Raw bearer token taken from the `Authorization` header. Not validated here;
/// pass it to [`crate::token::validate_session_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

/// The request carried no usable bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("missing bearer token")]
pub struct MissingBearer;

impl IntoResponse for MissingBearer {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = MissingBearer;

    // Extract synchronously and hand back a 'static future; `async fn` here trips
    // lifetime capture rules against axum-core's `impl Future + Send` signature.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_bearer)
            .map(str::to_owned);

        async move { token.map(BearerToken).ok_or(MissingBearer) }
    }
}

fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
