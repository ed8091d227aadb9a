//! Checkout: turn the cart into an order.
//!
//! [`place_order`] validates the shipping form, snapshots the cart into a
//! [`NewOrder`], submits it through an [`OrderGateway`], and empties the cart
//! only once the backend has accepted the order. A failed submission leaves
//! the cart exactly as it was so the customer can retry.

use thiserror::Error;
use tracing::{info, warn};

use glowvita_core::{Email, OrderStatus};

use crate::cart::CartContext;
use crate::orders::{NewOrder, OrderGateway, OrderGatewayError, OrderReceipt};

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A shipping form field is missing or malformed.
    #[error("invalid {field}: {reason}")]
    InvalidShipping {
        /// Form field name.
        field: &'static str,
        /// Human-readable problem.
        reason: String,
    },

    /// The backend did not accept the order.
    #[error("order submission failed: {0}")]
    Gateway(#[from] OrderGatewayError),
}

/// Shipping form as entered by the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub notes: Option<String>,
}

/// Shipping details that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidShipping {
    pub full_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub notes: Option<String>,
}

impl ShippingDetails {
    /// Check required fields and normalize whitespace.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidShipping` for the first field that is
    /// blank, or if the email is malformed, or if the phone number has fewer
    /// than 7 digits.
    pub fn validate(&self) -> Result<ValidShipping, CheckoutError> {
        let full_name = required("full_name", &self.full_name)?;
        let email = Email::parse(&self.email).map_err(|e| CheckoutError::InvalidShipping {
            field: "email",
            reason: e.to_string(),
        })?;
        let phone = required("phone", &self.phone)?;
        if phone.chars().filter(char::is_ascii_digit).count() < 7 {
            return Err(CheckoutError::InvalidShipping {
                field: "phone",
                reason: "must contain at least 7 digits".to_string(),
            });
        }
        let address = required("address", &self.address)?;
        let city = required("city", &self.city)?;
        let postal_code = required("postal_code", &self.postal_code)?;
        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(ToString::to_string);

        Ok(ValidShipping {
            full_name,
            email,
            phone,
            address,
            city,
            postal_code,
            notes,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, CheckoutError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CheckoutError::InvalidShipping {
            field,
            reason: "is required".to_string(),
        });
    }
    Ok(value.to_string())
}

/// Build the order row for the current cart contents.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if the cart has no lines.
pub fn build_order(cart: &CartContext, shipping: ValidShipping) -> Result<NewOrder, CheckoutError> {
    let items = cart.cart();
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    Ok(NewOrder {
        customer_name: shipping.full_name,
        email: shipping.email,
        phone: shipping.phone,
        address: shipping.address,
        city: shipping.city,
        postal_code: shipping.postal_code,
        notes: shipping.notes,
        total: cart.cart_total(),
        items,
        status: OrderStatus::Pending,
    })
}

/// Submit the cart as an order and clear it on success.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` or `CheckoutError::InvalidShipping`
/// before anything is sent, and `CheckoutError::Gateway` if the backend
/// rejects the order. The cart is only cleared when `Ok` is returned.
pub async fn place_order<G: OrderGateway>(
    cart: &CartContext,
    gateway: &G,
    shipping: &ShippingDetails,
) -> Result<OrderReceipt, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let shipping = shipping.validate()?;
    let order = build_order(cart, shipping)?;

    match gateway.create_order(&order).await {
        Ok(receipt) => {
            info!(order_id = %receipt.id, total = order.total, "Order placed");
            cart.clear_cart();
            Ok(receipt)
        }
        Err(e) => {
            warn!(error = %e, "Order submission failed, cart kept");
            Err(e.into())
        }
    }
}
