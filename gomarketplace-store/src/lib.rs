// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # GoMarketplace Store
//!
//! State management for the GoMarketplace shopping cart.
//!
//! This crate provides:
//!
//! - **CartStore**: The cart, restored from and written back to key-value storage
//! - **Storage**: `MemoryStorage` and file-backed `FileStorage` backends
//! - **StoreConfig**: Storage key, persist mode, and data directory settings
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use gomarketplace_core::NewCartItem;
//! use gomarketplace_store::{CartStore, StoreConfig};
//!
//! let config = StoreConfig::load().await?;
//! let cart = CartStore::open_with_config(&config).await?;
//!
//! cart.add_to_cart(NewCartItem::new("a", "Shirt", "https://img/a.png", 10.0)).await?;
//! cart.increment("a").await?;
//!
//! // Subscribe to changes
//! let mut rx = cart.subscribe();
//! while rx.changed().await.is_ok() {
//!     println!("Cart now has {} lines", cart.items().await.len());
//! }
//! ```

pub mod cart_store;
pub mod config;
pub mod error;
pub mod persistence;
pub mod storage;

pub use cart_store::CartStore;
pub use config::{CartStoreOptions, CorruptDataPolicy, LogLevel, PersistMode, StoreConfig};
pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_config_path, default_data_dir, load_json, save_json,
};
pub use storage::{FileStorage, MemoryStorage};
