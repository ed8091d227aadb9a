//! Glowvita Core - Shared types library.
//!
//! This crate provides common types used across all Glowvita components:
//! - `storefront` - Cart state, persistence and checkout
//! - `cli` - Command-line tools for driving a local cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere, including a wasm front end.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, cart item IDs, emails and order statuses
//! - [`catalog`] - Row models for the hosted catalog tables
//! - [`pricing`] - Discount arithmetic shared by every page that adds to the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod pricing;
pub mod types;

pub use types::*;
