use product_admin_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    seed_products(&pool).await?;

    println!("Seed completed");
    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let products = vec![
        ("Pen", 10.0, 5, "Stationery"),
        ("Pencil", 5.0, 0, "Stationery"),
        ("Notebook", 45.0, 120, "Stationery"),
        ("Desk Lamp", 799.0, 18, "Lighting"),
        ("Monitor Stand", 1250.0, 32, "Furniture"),
    ];

    for (name, price, stock, category) in products {
        // Names are not unique by design, so guard the seed by hand to keep
        // it idempotent.
        let exists: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM products WHERE name = $1 LIMIT 1")
                .bind(name)
                .fetch_optional(pool)
                .await?;
        if exists.is_some() {
            continue;
        }

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, stock, category)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(price)
        .bind(stock)
        .bind(category)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
