//! Local cart commands.
//!
//! # Usage
//!
//! ```bash
//! gv-cli cart show
//! gv-cli cart add --product 12 --name "Vitamin C Serum" --price 240 --discount 10
//! gv-cli cart update product:12 3
//! gv-cli cart remove product:12
//! gv-cli cart clear
//! ```

use std::fmt::Write as _;

use clap::{ArgGroup, Args};
use glowvita_core::pricing::{apply_discount, format_price};
use glowvita_core::{CartItemId, OfferId, ProductId};
use glowvita_storefront::cart::{CartLine, NewCartItem};
use glowvita_storefront::error::{AppError, Result};
use glowvita_storefront::state::AppState;

/// Arguments for `cart add`.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["product", "offer"])))]
pub struct AddArgs {
    /// Product id
    #[arg(long)]
    pub product: Option<i64>,

    /// Offer id
    #[arg(long)]
    pub offer: Option<i64>,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// List price before discount
    #[arg(long)]
    pub price: f64,

    /// Image URL
    #[arg(long, default_value = "")]
    pub image: String,

    /// Discount percentage applied before adding
    #[arg(long)]
    pub discount: Option<f64>,
}

impl AddArgs {
    fn into_item(self) -> Result<NewCartItem> {
        let id = match (self.product, self.offer) {
            (Some(product), None) => CartItemId::Product(ProductId::new(product)),
            (None, Some(offer)) => CartItemId::Offer(OfferId::new(offer)),
            _ => {
                return Err(AppError::BadRequest(
                    "pass exactly one of --product or --offer".to_string(),
                ));
            }
        };
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(AppError::BadRequest(format!(
                "price must be a non-negative number, got {}",
                self.price
            )));
        }

        let price = apply_discount(self.price, self.discount);
        Ok(NewCartItem::new(id, self.name, price, self.image))
    }
}

/// Print the cart.
pub fn show(state: &AppState) {
    let out = state
        .cart()
        .with_cart(|lines| render_cart(lines, state.cart().cart_total()));
    print(&out);
}

/// Add one unit of an item.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the arguments do not describe an item.
pub fn add(state: &AppState, args: AddArgs) -> Result<()> {
    let item = args.into_item()?;
    let id = item.id;
    state.cart().add_to_cart(item);

    let quantity = state
        .cart()
        .with_cart(|lines| lines.iter().find(|line| line.id == id).map(|line| line.quantity));
    tracing::info!(item = %id, quantity, "Added to cart");
    show(state);
    Ok(())
}

/// Remove a line.
pub fn remove(state: &AppState, item: CartItemId) {
    state.cart().remove_from_cart(item);
    show(state);
}

/// Set a line's quantity.
pub fn update(state: &AppState, item: CartItemId, quantity: i64) {
    state.cart().update_quantity(item, quantity);
    show(state);
}

/// Empty the cart.
pub fn clear(state: &AppState) {
    state.cart().clear_cart();
    print("Cart cleared.\n");
}

/// Render lines as a plain-text table followed by the total.
pub fn render_cart(lines: &[CartLine], total: f64) -> String {
    if lines.is_empty() {
        return "Cart is empty.\n".to_string();
    }

    let mut out = String::new();
    for line in lines {
        let _ = writeln!(
            out,
            "{:<12} {:<32} {:>4} x {:>10} = {:>10}",
            line.id.to_string(),
            line.name,
            line.quantity,
            format_price(line.price),
            format_price(line.line_total()),
        );
    }
    let _ = writeln!(out, "Total: {}", format_price(total));
    out
}

#[allow(clippy::print_stdout)]
fn print(text: &str) {
    print!("{text}");
}
