//! Domain models for the GoMarketplace cart.
//!
//! ## Submodules
//!
//! - [`item`] - Cart lines (`CartItem`, `NewCartItem`)
//! - [`cart`] - The collection, its events, and the reducer

mod cart;
mod item;

pub use cart::{Cart, CartEvent, CartTotals};
pub use item::{CartItem, NewCartItem};
