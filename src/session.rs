use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const SESSION_COOKIE: &str = "admin_session";
const SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Deserialize, Serialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: usize,
}

/// Proof that the request carries a valid admin session. Extracting this is
/// the guard: every route except login, health and docs requires it.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub email: String,
}

fn secret() -> AppResult<String> {
    std::env::var("SESSION_SECRET")
        .map_err(|_| AppError::Internal(anyhow::anyhow!("SESSION_SECRET is not set")))
}

/// Sign a fresh session token for the administrator.
pub fn issue_token(admin_email: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(SESSION_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = SessionClaims {
        sub: admin_email.to_string(),
        exp: expiration.timestamp() as usize,
    };

    let secret = secret()?;
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

/// The Set-Cookie value that installs a session.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict")
}

/// The Set-Cookie value that clears the session on logout.
pub fn expired_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0")
}

pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then_some(value)
        })
}

/// Decode the session cookie if present. A missing, tampered or expired
/// token is simply "not logged in"; only a missing secret is an error.
pub fn session_from_headers(headers: &HeaderMap) -> AppResult<Option<AdminSession>> {
    let Some(token) = cookie_value(headers, SESSION_COOKIE) else {
        return Ok(None);
    };

    let secret = secret()?;
    match decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(data) => Ok(Some(AdminSession {
            email: data.claims.sub,
        })),
        Err(_) => Ok(None),
    }
}

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        session_from_headers(&parts.headers)?.ok_or(AppError::AuthRequired)
    }
}
