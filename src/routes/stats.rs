use axum::{Json, extract::State};

use crate::{
    error::AppResult,
    response::ApiResponse,
    services::product_service,
    session::AdminSession,
    state::AppState,
    view::{self, DashboardStats},
};

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Dashboard aggregates", body = ApiResponse<DashboardStats>),
        (status = 401, description = "Not authenticated")
    ),
    tag = "Stats"
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let products = product_service::list_products(&state).await?;
    let data = view::stats(&products);
    Ok(Json(ApiResponse::success("Dashboard stats", data, None)))
}
