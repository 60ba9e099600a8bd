use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    dto::products::{ImageUpload, ProductForm, ProductList, ProductRow, ProductViewData},
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::ViewQuery,
    services::product_service,
    session::AdminSession,
    state::AppState,
    view,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            axum::routing::get(list_products).post(create_product),
        )
        .route("/view", axum::routing::get(view_products))
        .route(
            "/{id}",
            axum::routing::put(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Every product, unordered", body = ApiResponse<ProductList>),
        (status = 401, description = "Not authenticated")
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let items = product_service::list_products(&state).await?;
    let data = ProductList { items };
    Ok(Json(ApiResponse::success("Products", data, None)))
}

#[utoipa::path(
    get,
    path = "/api/products/view",
    params(
        ("q" = Option<String>, Query, description = "Free-text search over name and category"),
        ("category" = Option<String>, Query, description = "Exact category, or \"all\""),
        ("sort_by" = Option<String>, Query, description = "name | price | stock | category"),
        ("sort_order" = Option<String>, Query, description = "asc | desc"),
        ("page" = Option<i64>, Query, description = "1-indexed page, clamped into range"),
        ("per_page" = Option<i64>, Query, description = "Rows per page, default 10"),
    ),
    responses(
        (status = 200, description = "Filtered, sorted, paginated table view", body = ApiResponse<ProductViewData>),
        (status = 401, description = "Not authenticated")
    ),
    tag = "Products"
)]
pub async fn view_products(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<ViewQuery>,
) -> AppResult<Json<ApiResponse<ProductViewData>>> {
    let products = product_service::list_products(&state).await?;

    let params = query.view_params();
    let (page, per_page) = query.pagination().normalize();

    let filtered = view::filter_and_sort(&products, &params);
    let total_matched = filtered.len();
    let total_pages = view::total_pages(total_matched, per_page);
    // The pipeline leaves out-of-range pages alone; clamp here so a filter
    // change never strands the client on an empty page.
    let page = page.min(total_pages);

    let rows: Vec<ProductRow> = view::page_slice(&filtered, page, per_page)
        .iter()
        .cloned()
        .map(ProductRow::from)
        .collect();

    let data = ProductViewData {
        rows,
        total_matched,
        total_pages,
        categories: view::categories(&products),
    };
    let meta = Meta::paged(
        page as i64,
        per_page as i64,
        total_matched as i64,
        total_pages as i64,
    );
    Ok(Json(ApiResponse::success("Products view", data, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Created product", body = ApiResponse<Product>),
        (status = 400, description = "Per-field validation errors"),
        (status = 401, description = "Not authenticated")
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    admin: AdminSession,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let form = read_product_form(multipart).await?;
    let (draft, image) = form.into_new_draft();
    let product = product_service::create_product(&state, &admin, draft, image).await?;
    let body = ApiResponse::success("Product created", product, Some(Meta::empty()));
    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 400, description = "Per-field validation errors"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Product>>> {
    let form = read_product_form(multipart).await?;
    let (draft, image) = form.into_update_draft();
    let product = product_service::update_product(&state, &admin, id, draft, image).await?;
    Ok(Json(ApiResponse::success(
        "Updated",
        product,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    product_service::delete_product(&state, &admin, id).await?;
    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "success": true }),
        Some(Meta::empty()),
    )))
}

/// Collect the known product fields out of a multipart body. Unknown parts
/// are skipped; an empty image part counts as "no image supplied".
async fn read_product_form(mut multipart: Multipart) -> AppResult<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "name" => form.name = Some(read_text(field).await?),
            "price" => form.price = Some(read_text(field).await?),
            "stock" => form.stock = Some(read_text(field).await?),
            "category" => form.category = Some(read_text(field).await?),
            "image" => {
                let filename = field
                    .file_name()
                    .unwrap_or("upload")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}
