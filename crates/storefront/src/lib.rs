//! Glowvita Storefront library.
//!
//! Client-side state and checkout for the Glowvita storefront. Pages render
//! catalog data fetched from the hosted backend; everything they do with the
//! cart goes through this crate.
//!
//! # Modules
//!
//! - [`cart`] - `CartStore`, its persistence repository and the shared `CartContext`
//! - [`storage`] - Key-value storage media (memory, directory)
//! - [`checkout`] - Shipping validation and order placement
//! - [`orders`] - Order gateway to the hosted `orders` table
//! - [`config`] - Environment configuration
//! - [`state`] - Root application state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod orders;
pub mod state;
pub mod storage;
