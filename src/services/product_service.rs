use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::products::ImageUpload,
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    media::UploadedImage,
    models::Product,
    session::AdminSession,
    state::AppState,
    validate::{NewProductDraft, UpdateDraft},
};

/// Read-all: every product, in no particular order. Presentation imposes
/// order through the view pipeline.
pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    let items = Products::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();
    Ok(items)
}

pub async fn create_product(
    state: &AppState,
    session: &AdminSession,
    draft: NewProductDraft,
    image: Option<ImageUpload>,
) -> AppResult<Product> {
    let fields = draft.into_validated().map_err(AppError::Validation)?;

    // Upload before the insert; an upload failure aborts the whole create
    // so no partial record is ever written.
    let uploaded = upload_if_present(state, image).await?;

    let id = Uuid::new_v4();
    let active = ActiveModel {
        id: Set(id),
        name: Set(fields.name),
        price: Set(fields.price),
        stock: Set(fields.stock),
        category: Set(fields.category),
        image: Set(uploaded.map(|img| img.url)),
        created_at: NotSet,
    };
    let product = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&session.email),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(product_from_entity(product))
}

pub async fn update_product(
    state: &AppState,
    session: &AdminSession,
    id: Uuid,
    draft: UpdateDraft,
    image: Option<ImageUpload>,
) -> AppResult<Product> {
    let patch = draft.into_validated().map_err(AppError::Validation)?;

    // Same ordering as create: replacement image first, store write second.
    let uploaded = upload_if_present(state, image).await?;

    if patch.is_empty() && uploaded.is_none() {
        // Nothing to change; still distinguish a missing id from a no-op.
        let product = Products::find_by_id(id)
            .one(&state.orm)
            .await?
            .ok_or(AppError::NotFound)?;
        return Ok(product_from_entity(product));
    }

    let mut update = Products::update_many().filter(Column::Id.eq(id));
    if let Some(name) = patch.name {
        update = update.col_expr(Column::Name, Expr::value(name));
    }
    if let Some(price) = patch.price {
        update = update.col_expr(Column::Price, Expr::value(price));
    }
    if let Some(stock) = patch.stock {
        update = update.col_expr(Column::Stock, Expr::value(stock));
    }
    if let Some(category) = patch.category {
        update = update.col_expr(Column::Category, Expr::value(category));
    }
    if let Some(UploadedImage { url }) = uploaded {
        update = update.col_expr(Column::Image, Expr::value(url));
    }

    // Zero rows affected is the not-found signal, not a silent success.
    let result = update.exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&session.email),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(product_from_entity(product))
}

pub async fn delete_product(
    state: &AppState,
    session: &AdminSession,
    id: Uuid,
) -> AppResult<()> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(&session.email),
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(())
}

async fn upload_if_present(
    state: &AppState,
    image: Option<ImageUpload>,
) -> AppResult<Option<UploadedImage>> {
    match image {
        Some(img) => {
            let uploaded = state
                .media
                .upload(&img.filename, &img.content_type, img.bytes)
                .await?;
            Ok(Some(uploaded))
        }
        None => Ok(None),
    }
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
        stock: model.stock,
        category: model.category,
        image: model.image,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
