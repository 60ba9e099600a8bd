use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, header},
    response::{AppendHeaders, IntoResponse, Response},
    routing::post,
};

use crate::{
    dto::auth::{LoginRequest, LoginResponse},
    error::AppResult,
    response::{ApiResponse, Meta},
    services::auth_service,
    session::{self, AdminSession},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, session cookie set", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Response> {
    // An already-authenticated client is sent on its way without a
    // credential check or a fresh cookie.
    if session::session_from_headers(&headers)?.is_some() {
        let body = ApiResponse::success(
            "Already logged in",
            LoginResponse { success: true },
            Some(Meta::empty()),
        );
        return Ok(Json(body).into_response());
    }

    let token = auth_service::login_admin(&state, payload).await?;
    let cookie = session::session_cookie(&token);

    let body = ApiResponse::success(
        "Logged in",
        LoginResponse { success: true },
        Some(Meta::empty()),
    );
    Ok((AppendHeaders([(header::SET_COOKIE, cookie)]), Json(body)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out, session cookie cleared", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Not authenticated")
    ),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    admin: AdminSession,
) -> AppResult<Response> {
    auth_service::logout_admin(&state, &admin).await?;

    let body = ApiResponse::success(
        "Logged out",
        LoginResponse { success: true },
        Some(Meta::empty()),
    );
    Ok((
        AppendHeaders([(header::SET_COOKIE, session::expired_cookie())]),
        Json(body),
    )
        .into_response())
}
