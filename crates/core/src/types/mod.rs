//! Core types for Glowvita.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod item;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use item::{CartItemId, CartItemIdError};
pub use status::OrderStatus;
