//! Pure derivation of the product table view: filter, sort, paginate, plus
//! the dashboard aggregates. No I/O, no hidden state; callers recompute the
//! whole view from the current inputs on every request.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Price,
    Stock,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone)]
pub struct ViewParams {
    /// Free-text query matched against "name category", case-insensitive.
    pub query: String,
    /// Exact category, or [`ALL_CATEGORIES`] to disable the filter.
    pub category: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
            sort_key: SortKey::Name,
            sort_order: SortOrder::Asc,
        }
    }
}

#[derive(Debug)]
pub struct ProductView {
    pub rows: Vec<Product>,
    pub total_matched: usize,
    pub total_pages: usize,
}

fn matches(product: &Product, query_lower: &str, category: &str) -> bool {
    let haystack = format!("{} {}", product.name, product.category).to_lowercase();
    haystack.contains(query_lower)
        && (category == ALL_CATEGORIES || product.category == category)
}

fn compare(a: &Product, b: &Product, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::Stock => a.stock.cmp(&b.stock),
        SortKey::Category => a.category.cmp(&b.category),
    }
}

/// Filter by query/category and stable-sort by the requested key.
pub fn filter_and_sort(products: &[Product], params: &ViewParams) -> Vec<Product> {
    let query_lower = params.query.to_lowercase();
    let mut rows: Vec<Product> = products
        .iter()
        .filter(|p| matches(p, &query_lower, &params.category))
        .cloned()
        .collect();
    rows.sort_by(|a, b| {
        let ord = compare(a, b, params.sort_key);
        match params.sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    rows
}

/// Page count for a result set; an empty set still has one (empty) page.
/// A zero `rows_per_page` is treated as a single page rather than dividing
/// by zero.
pub fn total_pages(matched: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 1;
    }
    matched.div_ceil(rows_per_page).max(1)
}

/// The 1-indexed page window. Out-of-range pages yield an empty slice; the
/// caller is responsible for clamping `page` into `1..=total_pages`. A
/// `page` of 0 is off the low end and also yields page one's window start.
pub fn page_slice(rows: &[Product], page: usize, rows_per_page: usize) -> &[Product] {
    let start = page.saturating_sub(1).saturating_mul(rows_per_page);
    if start >= rows.len() {
        return &[];
    }
    let end = (start + rows_per_page).min(rows.len());
    &rows[start..end]
}

/// Full pipeline: filter -> sort -> paginate. `page` is taken as given, so
/// callers that let filter or sort inputs change must reset or clamp it
/// first to avoid landing on an empty out-of-range page.
pub fn derive_view(
    products: &[Product],
    params: &ViewParams,
    page: usize,
    rows_per_page: usize,
) -> ProductView {
    let filtered = filter_and_sort(products, params);
    let total_matched = filtered.len();
    let total_pages = total_pages(total_matched, rows_per_page);
    let rows = page_slice(&filtered, page, rows_per_page).to_vec();
    ProductView {
        rows,
        total_matched,
        total_pages,
    }
}

/// Stock badge tiers shown in the product table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    Low,
    Healthy,
}

impl StockLevel {
    pub fn classify(stock: i32) -> Self {
        match stock {
            ..=0 => StockLevel::OutOfStock,
            1..=20 => StockLevel::Low,
            _ => StockLevel::Healthy,
        }
    }
}

/// The filter dropdown options: "all" plus each category in first-seen order.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut options = vec![ALL_CATEGORIES.to_string()];
    for product in products {
        if !options[1..].contains(&product.category) {
            options.push(product.category.clone());
        }
    }
    options
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryBreakdown {
    pub category: String,
    pub stock: i64,
    pub price_total: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_stock: i64,
    pub avg_price: f64,
    pub categories: Vec<CategoryBreakdown>,
}

/// Aggregates behind the dashboard cards and charts: product count, summed
/// stock, mean price, and per-category stock/price totals in first-seen order.
pub fn stats(products: &[Product]) -> DashboardStats {
    let total_products = products.len();
    let total_stock = products.iter().map(|p| i64::from(p.stock)).sum();
    let price_sum: f64 = products.iter().map(|p| p.price).sum();
    let avg_price = if total_products == 0 {
        0.0
    } else {
        price_sum / total_products as f64
    };

    let mut categories: Vec<CategoryBreakdown> = Vec::new();
    for product in products {
        match categories.iter_mut().find(|c| c.category == product.category) {
            Some(entry) => {
                entry.stock += i64::from(product.stock);
                entry.price_total += product.price;
            }
            None => categories.push(CategoryBreakdown {
                category: product.category.clone(),
                stock: i64::from(product.stock),
                price_total: product.price,
            }),
        }
    }

    DashboardStats {
        total_products,
        total_stock,
        avg_price,
        categories,
    }
}
