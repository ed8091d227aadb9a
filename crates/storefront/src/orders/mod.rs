//! Order submission to the hosted `orders` table.
//!
//! The storefront only ever inserts orders; status changes are made by the
//! back office. [`OrderGateway`] is the seam checkout talks to, and
//! [`RestOrderGateway`] implements it over the hosted store's REST endpoint.

mod rest;

pub use rest::RestOrderGateway;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use glowvita_core::{Email, OrderId, OrderStatus};

use crate::cart::CartLine;

/// Errors that can occur when submitting an order.
#[derive(Debug, Error)]
pub enum OrderGatewayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The backend rejected the insert.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The insert succeeded but returned no row.
    #[error("order insert returned no row")]
    EmptyResponse,
}

/// Row inserted into the `orders` table.
///
/// `items` carries the cart lines in the same JSON shape as the persisted cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<CartLine>,
    pub total: f64,
    pub status: OrderStatus,
}

/// What the backend returns for a created order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderReceipt {
    pub id: OrderId,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Creates orders in the backing store.
pub trait OrderGateway {
    /// Insert `order` and return the stored row's receipt.
    fn create_order(
        &self,
        order: &NewOrder,
    ) -> impl Future<Output = Result<OrderReceipt, OrderGatewayError>>;
}
