use chrono::Utc;
use product_admin_api::models::Product;
use product_admin_api::view::{
    self, SortKey, SortOrder, StockLevel, ViewParams,
};
use uuid::Uuid;

fn product(name: &str, category: &str, price: f64, stock: i32) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        price,
        stock,
        category: category.to_string(),
        image: None,
        created_at: Utc::now(),
    }
}

fn stationery() -> Vec<Product> {
    vec![
        product("Pen", "Stationery", 10.0, 5),
        product("Pencil", "Stationery", 5.0, 0),
    ]
}

fn params() -> ViewParams {
    ViewParams::default()
}

#[test]
fn query_matches_name_and_category_substring_case_insensitive() {
    let products = stationery();

    // "pen" is a substring of both "Pen" and "Pencil".
    let rows = view::filter_and_sort(
        &products,
        &ViewParams {
            query: "pen".to_string(),
            ..params()
        },
    );
    assert_eq!(rows.len(), 2);

    let rows = view::filter_and_sort(
        &products,
        &ViewParams {
            query: "PENCIL".to_string(),
            ..params()
        },
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Pencil");

    // Category text is part of the haystack too.
    let rows = view::filter_and_sort(
        &products,
        &ViewParams {
            query: "stationery".to_string(),
            ..params()
        },
    );
    assert_eq!(rows.len(), 2);
}

#[test]
fn category_all_is_equivalent_to_no_filter() {
    let mut products = stationery();
    products.push(product("Desk Lamp", "Lighting", 799.0, 18));

    let all = view::filter_and_sort(
        &products,
        &ViewParams {
            category: "all".to_string(),
            ..params()
        },
    );
    assert_eq!(all.len(), products.len());

    let lighting = view::filter_and_sort(
        &products,
        &ViewParams {
            category: "Lighting".to_string(),
            ..params()
        },
    );
    assert_eq!(lighting.len(), 1);
    assert!(lighting.iter().all(|p| p.category == "Lighting"));
}

#[test]
fn category_filter_is_exact_not_substring() {
    let products = vec![
        product("Pen", "Stationery", 10.0, 5),
        product("Stapler", "Stationery Extras", 30.0, 2),
    ];

    let rows = view::filter_and_sort(
        &products,
        &ViewParams {
            category: "Stationery".to_string(),
            ..params()
        },
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Pen");
}

#[test]
fn sort_by_price_ascending_and_descending() {
    let products = stationery();

    let asc = view::filter_and_sort(
        &products,
        &ViewParams {
            sort_key: SortKey::Price,
            sort_order: SortOrder::Asc,
            ..params()
        },
    );
    let names: Vec<&str> = asc.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Pencil", "Pen"]);

    let desc = view::filter_and_sort(
        &products,
        &ViewParams {
            sort_key: SortKey::Price,
            sort_order: SortOrder::Desc,
            ..params()
        },
    );
    let names: Vec<&str> = desc.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Pen", "Pencil"]);
}

#[test]
fn sort_is_stable_for_ties() {
    let products = vec![
        product("B", "Stationery", 5.0, 1),
        product("A", "Stationery", 5.0, 1),
        product("C", "Stationery", 5.0, 1),
    ];

    let rows = view::filter_and_sort(
        &products,
        &ViewParams {
            sort_key: SortKey::Price,
            ..params()
        },
    );
    let names: Vec<&str> = rows.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["B", "A", "C"]);
}

#[test]
fn pagination_windows_and_page_count() {
    let products: Vec<Product> = (0..12)
        .map(|i| product(&format!("P{i:02}"), "Bulk", 1.0 + i as f64, 1))
        .collect();

    assert_eq!(view::total_pages(12, 10), 2);
    assert_eq!(view::total_pages(0, 10), 1);
    assert_eq!(view::total_pages(10, 10), 1);

    let sorted = view::filter_and_sort(&products, &params());
    assert_eq!(view::page_slice(&sorted, 1, 10).len(), 10);
    assert_eq!(view::page_slice(&sorted, 2, 10).len(), 2);
    assert_eq!(view::page_slice(&sorted, 2, 10)[0].name, "P10");

    // The pipeline leaves out-of-range pages to the caller.
    assert!(view::page_slice(&sorted, 3, 10).is_empty());
}

#[test]
fn degenerate_page_inputs_do_not_panic() {
    let products = stationery();
    let sorted = view::filter_and_sort(&products, &params());

    // Page 0 is off the low end; it reads as the first window.
    assert_eq!(view::page_slice(&sorted, 0, 10).len(), 2);
    assert!(view::page_slice(&sorted, 1, 0).is_empty());

    assert_eq!(view::total_pages(5, 0), 1);
    assert_eq!(view::total_pages(0, 0), 1);
}

#[test]
fn caller_clamp_keeps_page_in_range_when_rows_per_page_grows() {
    // 12 records, page 3 of 10-per-page becomes page 1 of 25-per-page.
    let total_pages = view::total_pages(12, 25);
    assert_eq!(total_pages, 1);

    let page = 3usize.min(total_pages);
    assert_eq!(page, 1);
}

#[test]
fn derive_view_combines_filter_sort_and_page() {
    let products = stationery();
    let derived = view::derive_view(
        &products,
        &ViewParams {
            sort_key: SortKey::Price,
            ..params()
        },
        1,
        1,
    );
    assert_eq!(derived.total_matched, 2);
    assert_eq!(derived.total_pages, 2);
    assert_eq!(derived.rows.len(), 1);
    assert_eq!(derived.rows[0].name, "Pencil");
}

#[test]
fn stock_levels_classify_by_tier() {
    assert_eq!(StockLevel::classify(0), StockLevel::OutOfStock);
    assert_eq!(StockLevel::classify(5), StockLevel::Low);
    assert_eq!(StockLevel::classify(20), StockLevel::Low);
    assert_eq!(StockLevel::classify(21), StockLevel::Healthy);
}

#[test]
fn category_options_start_with_all_and_deduplicate() {
    let mut products = stationery();
    products.push(product("Desk Lamp", "Lighting", 799.0, 18));

    let options = view::categories(&products);
    assert_eq!(options, ["all", "Stationery", "Lighting"]);
}

#[test]
fn stats_aggregate_counts_stock_and_mean_price() {
    let mut products = stationery();
    products.push(product("Desk Lamp", "Lighting", 15.0, 18));

    let stats = view::stats(&products);
    assert_eq!(stats.total_products, 3);
    assert_eq!(stats.total_stock, 23);
    assert!((stats.avg_price - 10.0).abs() < f64::EPSILON);

    assert_eq!(stats.categories.len(), 2);
    assert_eq!(stats.categories[0].category, "Stationery");
    assert_eq!(stats.categories[0].stock, 5);
    assert!((stats.categories[0].price_total - 15.0).abs() < f64::EPSILON);
    assert_eq!(stats.categories[1].category, "Lighting");
}

#[test]
fn stats_on_empty_catalog_are_zeroed() {
    let stats = view::stats(&[]);
    assert_eq!(stats.total_products, 0);
    assert_eq!(stats.total_stock, 0);
    assert_eq!(stats.avg_price, 0.0);
    assert!(stats.categories.is_empty());
}
