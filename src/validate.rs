use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

/// Candidate product as it comes off the form: numeric fields are already
/// coerced, with NaN standing in for values that failed to parse so the
/// rules below report them instead of the transport layer.
#[derive(Debug, Clone)]
pub struct NewProductDraft {
    pub name: String,
    pub price: f64,
    pub stock: f64,
    pub category: String,
}

/// Field-sparse candidate for updates; absent fields are not validated.
#[derive(Debug, Clone, Default)]
pub struct UpdateDraft {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<f64>,
    pub category: Option<String>,
}

/// Accepted, normalized product fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub category: String,
}

/// Accepted, normalized partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub category: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
    }
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn check_name(errors: &mut ValidationErrors, name: &str) {
    if name.chars().count() < 2 {
        errors.add(
            "name",
            violation("too_short", "Product name must be at least 2 characters"),
        );
    }
}

fn check_price(errors: &mut ValidationErrors, price: f64) {
    // NaN (unparseable input) fails the comparison as well.
    if !(price > 0.0) {
        errors.add(
            "price",
            violation("not_positive", "Price must be greater than 0"),
        );
    }
}

fn check_stock(errors: &mut ValidationErrors, stock: f64) {
    // Both rules are evaluated; -2.5 reports NotInteger and Negative.
    if stock.is_nan() || stock.fract() != 0.0 {
        errors.add("stock", violation("not_integer", "Stock must be an integer"));
    }
    if stock < 0.0 {
        errors.add("stock", violation("negative", "Stock cannot be negative"));
    }
}

fn check_category(errors: &mut ValidationErrors, category: &str) {
    if category.chars().count() < 2 {
        errors.add(
            "category",
            violation("too_short", "Category must be at least 2 characters"),
        );
    }
}

impl Validate for NewProductDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, &self.name);
        check_price(&mut errors, self.price);
        check_stock(&mut errors, self.stock);
        check_category(&mut errors, &self.category);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Validate for UpdateDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            check_name(&mut errors, name);
        }
        if let Some(price) = self.price {
            check_price(&mut errors, price);
        }
        if let Some(stock) = self.stock {
            check_stock(&mut errors, stock);
        }
        if let Some(category) = &self.category {
            check_category(&mut errors, category);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl NewProductDraft {
    /// Run every rule and return the normalized record, or the accumulated
    /// per-field violations. Values are never clamped into range.
    pub fn into_validated(self) -> Result<NewProduct, ValidationErrors> {
        self.validate()?;
        Ok(NewProduct {
            name: self.name,
            price: self.price,
            stock: self.stock as i32,
            category: self.category,
        })
    }
}

impl UpdateDraft {
    pub fn into_validated(self) -> Result<ProductPatch, ValidationErrors> {
        self.validate()?;
        Ok(ProductPatch {
            name: self.name,
            price: self.price,
            stock: self.stock.map(|s| s as i32),
            category: self.category,
        })
    }
}
