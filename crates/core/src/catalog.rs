//! Row models for the hosted catalog tables.
//!
//! The storefront reads these with generic filtered selects; field names match
//! the table columns so rows deserialize directly from the REST responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing::apply_discount;
use crate::types::{BrandId, CategoryId, OfferId, ProductId, SubCategoryId};

/// A brand (`brands` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// A top-level category (`categories` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A sub category (`sub_categories` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: SubCategoryId,
    pub category_id: CategoryId,
    pub name: String,
}

/// A catalog product (`products` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// List price before discount.
    pub price: f64,
    /// Discount percentage, if any.
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub brand_id: Option<BrandId>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub sub_category_id: Option<SubCategoryId>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Unit price after the product discount.
    #[must_use]
    pub fn final_price(&self) -> f64 {
        apply_discount(self.price, self.discount)
    }

    /// Whether the product can be added to the cart.
    ///
    /// Rows without a stock column are treated as available.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock.is_none_or(|stock| stock > 0)
    }
}

/// A promotional offer (`offers` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Price before the offer discount.
    pub price: f64,
    /// Discount percentage, if any.
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl Offer {
    /// Unit price after the offer discount.
    #[must_use]
    pub fn final_price(&self) -> f64 {
        apply_discount(self.price, self.discount)
    }
}
