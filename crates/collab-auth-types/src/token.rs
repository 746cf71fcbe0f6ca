//! Session tokens: HS256 JWTs scoped to one identity.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use collab_domain::id::UserId;

/// Session lifetime in seconds (7 days).
pub const SESSION_TOKEN_EXP: u64 = 60 * 60 * 24 * 7;

/// Identity extracted from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub user_id: UserId,
    pub email: String,
    pub expires_at: u64,
}

/// Errors returned by [`validate_session_token`] and [`issue_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims payload.
///
/// | Field   | JWT claim | Meaning                      |
/// |---------|-----------|------------------------------|
/// | `sub`   | `sub`     | identity id (UUID string)    |
/// | `email` | custom    | identity email at issue time |
/// | `exp`   | `exp`     | expiry, seconds since epoch  |
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub email: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

/// Sign a session token for `user_id`. Returns the token and its expiry.
pub fn issue_session_token(
    user_id: UserId,
    email: &str,
    secret: &str,
) -> Result<(String, u64), TokenError> {
    let exp = now_secs() + SESSION_TOKEN_EXP;
    let claims = SessionClaims {
        sub: user_id.to_string(),
        email: email.to_owned(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Signing)?;
    Ok((token, exp))
}

/// Validate a session token, returning the identity it is scoped to.
///
/// Validation: HS256, `exp` checked with the default 60s leeway, `exp` + `sub` required.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionInfo, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    let user_id = data
        .claims
        .sub
        .parse::<UserId>()
        .map_err(|_| TokenError::Malformed)?;
    Ok(SessionInfo {
        user_id,
        email: data.claims.email,
        expires_at: data.claims.exp,
    })
}
