//! Identifier of something that can sit in the cart.
//!
//! Products and promotional offers live in separate tables that share the same
//! numeric id space, so a bare number cannot tell them apart. [`CartItemId`]
//! carries the kind alongside the number.
//!
//! # Wire format
//!
//! Persisted carts predate the tagged form, so the JSON representation stays
//! the legacy one:
//!
//! | variant | JSON |
//! |---|---|
//! | `Product(12)` | `12` |
//! | `Offer(12)` | `"offer-12"` |
//!
//! A numeric string (`"12"`) is also read as a product id.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::id::{OfferId, ProductId};

/// Prefix used for offer ids in the persisted cart.
pub const OFFER_ID_PREFIX: &str = "offer-";

/// Errors that can occur when parsing a [`CartItemId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartItemIdError {
    /// The input string is empty.
    #[error("cart item id cannot be empty")]
    Empty,
    /// The numeric part is not a valid integer.
    #[error("invalid cart item id: {0}")]
    Invalid(String),
}

/// A product or an offer, as referenced by a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CartItemId {
    /// A regular catalog product.
    Product(ProductId),
    /// A promotional offer.
    Offer(OfferId),
}

impl CartItemId {
    /// Shorthand for a product id.
    #[must_use]
    pub const fn product(id: i64) -> Self {
        Self::Product(ProductId::new(id))
    }

    /// Shorthand for an offer id.
    #[must_use]
    pub const fn offer(id: i64) -> Self {
        Self::Offer(OfferId::new(id))
    }

    /// Returns `true` if this id refers to an offer.
    #[must_use]
    pub const fn is_offer(&self) -> bool {
        matches!(self, Self::Offer(_))
    }

    /// Parse the legacy persisted string form (`"offer-12"` or `"12"`).
    fn from_legacy_str(s: &str) -> Result<Self, CartItemIdError> {
        if let Some(rest) = s.strip_prefix(OFFER_ID_PREFIX) {
            return parse_number(rest).map(Self::offer);
        }
        parse_number(s).map(Self::product)
    }
}

fn parse_number(s: &str) -> Result<i64, CartItemIdError> {
    s.parse::<i64>()
        .map_err(|_| CartItemIdError::Invalid(s.to_string()))
}

/// Human-facing form: `product:12` / `offer:12`.
impl fmt::Display for CartItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product(id) => write!(f, "product:{id}"),
            Self::Offer(id) => write!(f, "offer:{id}"),
        }
    }
}

/// Accepts `12`, `product:12`, `offer:12` and the persisted `offer-12`.
impl FromStr for CartItemId {
    type Err = CartItemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CartItemIdError::Empty);
        }

        if let Some(rest) = s.strip_prefix("product:") {
            return parse_number(rest.trim()).map(Self::product);
        }
        if let Some(rest) = s.strip_prefix("offer:") {
            return parse_number(rest.trim()).map(Self::offer);
        }
        Self::from_legacy_str(s)
    }
}

impl From<ProductId> for CartItemId {
    fn from(id: ProductId) -> Self {
        Self::Product(id)
    }
}

impl From<OfferId> for CartItemId {
    fn from(id: OfferId) -> Self {
        Self::Offer(id)
    }
}

impl Serialize for CartItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Product(id) => serializer.serialize_i64(id.as_i64()),
            Self::Offer(id) => serializer.collect_str(&format_args!("{OFFER_ID_PREFIX}{id}")),
        }
    }
}

impl<'de> Deserialize<'de> for CartItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self::product(n)),
            Raw::Text(s) => Self::from_legacy_str(&s).map_err(serde::de::Error::custom),
        }
    }
}
