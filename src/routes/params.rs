use serde::Deserialize;
use utoipa::ToSchema;

use crate::view::{ALL_CATEGORIES, SortKey, SortOrder, ViewParams};

#[derive(Debug, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    /// Defaults to 10 rows per page, like the admin table.
    pub fn normalize(&self) -> (usize, usize) {
        let page = self.page.unwrap_or(1).max(1) as usize;
        let per_page = self.per_page.unwrap_or(10).clamp(1, 100) as usize;
        (page, per_page)
    }
}

// Pagination fields are inlined rather than flattened: serde_urlencoded
// cannot deserialize numbers through a flattened struct.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ViewQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<SortKey>,
    pub sort_order: Option<SortOrder>,
}

impl ViewQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn view_params(&self) -> ViewParams {
        ViewParams {
            query: self.q.clone().unwrap_or_default(),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| ALL_CATEGORIES.to_string()),
            sort_key: self.sort_by.unwrap_or(SortKey::Name),
            sort_order: self.sort_order.unwrap_or(SortOrder::Asc),
        }
    }
}
