use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{auth::{LoginRequest, LoginResponse}, products},
    models::Product,
    response::{ApiResponse, Meta},
    routes::{auth, health, params, products as product_routes, stats},
    session::SESSION_COOKIE,
    view,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::logout,
        product_routes::list_products,
        product_routes::view_products,
        product_routes::create_product,
        product_routes::update_product,
        product_routes::delete_product,
        stats::dashboard_stats,
    ),
    components(
        schemas(
            Product,
            LoginRequest,
            LoginResponse,
            products::ProductList,
            products::ProductRow,
            products::ProductViewData,
            params::Pagination,
            params::ViewQuery,
            view::SortKey,
            view::SortOrder,
            view::StockLevel,
            view::CategoryBreakdown,
            view::DashboardStats,
            Meta,
            ApiResponse<Product>,
            ApiResponse<products::ProductList>,
            ApiResponse<products::ProductViewData>,
            ApiResponse<view::DashboardStats>,
            ApiResponse<LoginResponse>
        )
    ),
    security(
        ("session_cookie" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Administrator session endpoints"),
        (name = "Products", description = "Product CRUD and table view endpoints"),
        (name = "Stats", description = "Dashboard aggregate endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
