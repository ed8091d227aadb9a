//! Cart line types.

use serde::{Deserialize, Serialize};

use glowvita_core::CartItemId;
use glowvita_core::catalog::{Offer, Product};

/// One entry in the cart.
///
/// `name`, `price` and `image` are captured when the item is added and are
/// never re-fetched. Field names are the persisted JSON keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CartLine {
    pub id: CartItemId,
    pub name: String,
    /// Unit price, already discount-resolved.
    pub price: f64,
    pub image: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Input to [`CartStore::add_to_cart`](super::CartStore::add_to_cart).
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub id: CartItemId,
    pub name: String,
    pub price: f64,
    pub image: String,
}

impl NewCartItem {
    /// Create an item from already-resolved values.
    pub fn new(
        id: impl Into<CartItemId>,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }

    /// Build an item from a catalog product at its discounted price.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: CartItemId::Product(product.id),
            name: product.name.clone(),
            price: product.final_price(),
            image: product.image_url.clone().unwrap_or_default(),
        }
    }

    /// Build an item from a promotional offer at its discounted price.
    #[must_use]
    pub fn from_offer(offer: &Offer) -> Self {
        Self {
            id: CartItemId::Offer(offer.id),
            name: offer.title.clone(),
            price: offer.final_price(),
            image: offer.image_url.clone().unwrap_or_default(),
        }
    }

    pub(crate) fn into_line(self) -> CartLine {
        CartLine {
            id: self.id,
            name: self.name,
            price: self.price,
            image: self.image,
            quantity: 1,
        }
    }
}
