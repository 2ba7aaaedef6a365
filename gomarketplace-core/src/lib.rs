// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # GoMarketplace Core
//!
//! Core types, reducer, and traits for the GoMarketplace shopping cart.
//!
//! This crate has no I/O of its own. It provides:
//!
//! - Domain models (cart lines, the cart collection, events)
//! - The pure cart reducer ([`Cart::apply`])
//! - The storage text format ([`codec`])
//! - The [`KeyValueStore`] trait that storage backends implement
//!
//! ## Key Types
//!
//! - [`CartItem`] - One product line with a quantity
//! - [`NewCartItem`] - A product descriptor passed to "add to cart"
//! - [`Cart`] - Ordered lines with unique ids
//! - [`CartEvent`] - Add / increment / decrement / clear
//! - [`CartTotals`] - Derived line, quantity and price sums

pub mod codec;
pub mod error;
pub mod models;
pub mod traits;

/// Storage key the cart blob lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "@gomarketplace:products";

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{Cart, CartEvent, CartItem, CartTotals, NewCartItem};

// Re-export traits
pub use traits::KeyValueStore;
