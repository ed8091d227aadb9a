//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! gv-cli checkout --name "Mona Adel" --email mona@example.com --phone 01000000000 \
//!     --address "12 Nile St" --city Cairo --postal-code 11511 --notes "Ring twice"
//! ```
//!
//! # Environment Variables
//!
//! - `GLOWVITA_BACKEND_URL` - Base URL of the hosted backend
//! - `GLOWVITA_BACKEND_ANON_KEY` - Public API key for the hosted backend

use clap::Args;
use glowvita_core::pricing::format_price;
use glowvita_storefront::checkout::{ShippingDetails, place_order};
use glowvita_storefront::error::Result;
use glowvita_storefront::state::AppState;

/// Shipping form fields for `checkout`.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Full name of the recipient
    #[arg(long)]
    pub name: String,

    /// Contact email
    #[arg(long)]
    pub email: String,

    /// Contact phone number
    #[arg(long)]
    pub phone: String,

    /// Street address
    #[arg(long)]
    pub address: String,

    /// City
    #[arg(long)]
    pub city: String,

    /// Postal code
    #[arg(long)]
    pub postal_code: String,

    /// Delivery notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<CheckoutArgs> for ShippingDetails {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            full_name: args.name,
            email: args.email,
            phone: args.phone,
            address: args.address,
            city: args.city,
            postal_code: args.postal_code,
            notes: args.notes,
        }
    }
}

/// Submit the local cart as an order.
///
/// # Errors
///
/// Returns an error if no backend is configured, the form is invalid, the
/// cart is empty, or the backend rejects the order. The cart is kept in all
/// of those cases.
pub async fn run(state: &AppState, args: CheckoutArgs) -> Result<()> {
    let gateway = state.order_gateway()?;
    let shipping = ShippingDetails::from(args);
    let total = state.cart().cart_total();

    let receipt = place_order(state.cart(), &gateway, &shipping).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Order #{} placed ({})", receipt.id, receipt.status);
        println!("Total: {}", format_price(total));
    }
    Ok(())
}
