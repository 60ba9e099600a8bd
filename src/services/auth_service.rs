use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::{
    audit::log_audit,
    dto::auth::LoginRequest,
    error::{AppError, AppResult},
    session::{self, AdminSession},
    state::AppState,
};

/// Check a submitted pair against the configured administrator credentials.
/// The password is verified against the startup-computed argon2 hash; the
/// caller learns only match/no-match, never which half was wrong.
pub fn credentials_match(
    admin_email: &str,
    admin_password_hash: &str,
    payload: &LoginRequest,
) -> bool {
    let email_ok = payload.email == admin_email;

    let Ok(parsed_hash) = PasswordHash::new(admin_password_hash) else {
        return false;
    };
    let password_ok = Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .is_ok();

    email_ok && password_ok
}

/// Validate the credential pair and issue a signed session token.
pub async fn login_admin(state: &AppState, payload: LoginRequest) -> AppResult<String> {
    if !credentials_match(&state.admin_email, &state.admin_password_hash, &payload) {
        return Err(AppError::InvalidCredentials);
    }

    let token = session::issue_token(&state.admin_email)?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&state.admin_email),
        "admin_login",
        Some("session"),
        None,
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(token)
}

pub async fn logout_admin(state: &AppState, session: &AdminSession) -> AppResult<()> {
    if let Err(err) = log_audit(
        &state.pool,
        Some(&session.email),
        "admin_logout",
        Some("session"),
        None,
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
    Ok(())
}
