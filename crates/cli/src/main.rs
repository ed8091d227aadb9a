//! Glowvita CLI - Local cart and checkout tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart stored in $GLOWVITA_DATA_DIR (default: .glowvita)
//! gv-cli cart show
//!
//! # Add a product (or an offer) at its discounted price
//! gv-cli cart add --product 12 --name "Vitamin C Serum" --price 240 --discount 10 --image /serum.png
//! gv-cli cart add --offer 3 --name "Summer Kit" --price 499
//!
//! # Change or remove lines
//! gv-cli cart update product:12 3
//! gv-cli cart remove offer:3
//! gv-cli cart clear
//!
//! # Submit the cart as an order (needs GLOWVITA_BACKEND_URL / GLOWVITA_BACKEND_ANON_KEY)
//! gv-cli checkout --name "Mona Adel" --email mona@example.com --phone 01000000000 \
//!     --address "12 Nile St" --city Cairo --postal-code 11511
//! ```
//!
//! # Commands
//!
//! - `cart` - Inspect and edit the local cart
//! - `checkout` - Place an order for the local cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use glowvita_core::CartItemId;
use glowvita_storefront::config::StorefrontConfig;
use glowvita_storefront::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "gv-cli")]
#[command(author, version, about = "Glowvita storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the local cart
    Checkout(commands::checkout::CheckoutArgs),
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart lines and total
    Show,
    /// Add one unit of a product or offer
    Add(commands::cart::AddArgs),
    /// Remove a line (`12`, `product:12`, `offer:3`)
    Remove {
        /// Item to remove
        item: CartItemId,
    },
    /// Set the quantity of a line (values below 1 become 1)
    Update {
        /// Item to update
        item: CartItemId,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line and delete the stored cart
    Clear,
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "glowvita_cli=info,glowvita_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> glowvita_storefront::error::Result<()> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config);

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add(args) => commands::cart::add(&state, args)?,
            CartAction::Remove { item } => commands::cart::remove(&state, item),
            CartAction::Update { item, quantity } => {
                commands::cart::update(&state, item, quantity);
            }
            CartAction::Clear => commands::cart::clear(&state),
        },
        Commands::Checkout(args) => commands::checkout::run(&state, args).await?,
    }

    if let Some(err) = state.cart().last_persist_error() {
        tracing::warn!("Cart change was not saved: {err}");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_with_negative_quantity() {
        let cli = Cli::try_parse_from(["gv-cli", "cart", "update", "offer:3", "-2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cart {
                action: CartAction::Update { item, quantity: -2 }
            } if item == CartItemId::offer(3)
        ));
    }

    #[test]
    fn test_add_requires_product_or_offer() {
        assert!(Cli::try_parse_from(["gv-cli", "cart", "add", "--name", "A", "--price", "1"]).is_err());
        assert!(
            Cli::try_parse_from([
                "gv-cli", "cart", "add", "--product", "1", "--offer", "2", "--name", "A", "--price",
                "1",
            ])
            .is_err()
        );
        assert!(
            Cli::try_parse_from(["gv-cli", "cart", "add", "--offer", "2", "--name", "A", "--price", "1"])
                .is_ok()
        );
    }

    #[test]
    fn test_remove_rejects_bad_item() {
        assert!(Cli::try_parse_from(["gv-cli", "cart", "remove", "promo:1"]).is_err());
    }
}
