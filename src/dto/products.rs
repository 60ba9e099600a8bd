use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;
use crate::validate::{NewProductDraft, UpdateDraft};
use crate::view::StockLevel;

#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}

/// One table row in the derived view, with its stock badge tier.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub stock_level: StockLevel,
    pub category: String,
    pub image: Option<String>,
}

impl From<Product> for ProductRow {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            stock: product.stock,
            stock_level: StockLevel::classify(product.stock),
            category: product.category,
            image: product.image,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductViewData {
    pub rows: Vec<ProductRow>,
    pub total_matched: usize,
    pub total_pages: usize,
    /// Filter dropdown options: "all" plus each known category.
    pub categories: Vec<String>,
}

/// An image file lifted out of the multipart body.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Raw text fields off the product form, before coercion and validation.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub category: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Form-style number coercion: blank means zero, anything unparseable
/// becomes NaN and is reported by the validation rules.
fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

impl ProductForm {
    /// Interpret the form as a full candidate record; missing fields fall
    /// back to empty/zero so validation reports them.
    pub fn into_new_draft(self) -> (NewProductDraft, Option<ImageUpload>) {
        let draft = NewProductDraft {
            name: self.name.unwrap_or_default(),
            price: self.price.as_deref().map(coerce_number).unwrap_or(0.0),
            stock: self.stock.as_deref().map(coerce_number).unwrap_or(0.0),
            category: self.category.unwrap_or_default(),
        };
        (draft, self.image)
    }

    /// Interpret the form as a sparse update; absent fields stay untouched.
    pub fn into_update_draft(self) -> (UpdateDraft, Option<ImageUpload>) {
        let draft = UpdateDraft {
            name: self.name,
            price: self.price.as_deref().map(coerce_number),
            stock: self.stock.as_deref().map(coerce_number),
            category: self.category,
        };
        (draft, self.image)
    }
}
