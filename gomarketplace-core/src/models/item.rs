//! Cart line item types.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Cart Item
// ============================================================================

/// One product line in the cart.
///
/// Field names match the persisted format: `id`, `title`, `image_url`,
/// `price`, `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier, unique within a cart.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Product image reference.
    pub image_url: String,
    /// Unit price.
    pub price: f64,
    /// Number of units. Always at least 1 inside a cart.
    pub quantity: u32,
}

impl CartItem {
    /// Builds a line with quantity 1 from a product descriptor.
    pub fn from_new(item: NewCartItem) -> Self {
        Self::with_quantity(item, 1)
    }

    /// Builds a line from a product descriptor and an explicit quantity.
    pub fn with_quantity(item: NewCartItem, quantity: u32) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image_url: item.image_url,
            price: item.price,
            quantity,
        }
    }

    /// Price of the whole line (`price * quantity`).
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Validates a single line.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` if the id is empty, the quantity is
    /// zero, or the price is not finite.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.is_empty() {
            return Err(CoreError::InvalidData("item id is empty".to_string()));
        }
        if self.quantity == 0 {
            return Err(CoreError::InvalidData(format!(
                "item {} has quantity 0",
                self.id
            )));
        }
        if !self.price.is_finite() {
            return Err(CoreError::InvalidData(format!(
                "item {} has non-finite price",
                self.id
            )));
        }
        Ok(())
    }
}

// ============================================================================
// New Cart Item
// ============================================================================

/// A product descriptor without a quantity, as passed to `add_to_cart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCartItem {
    /// Product identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Product image reference.
    pub image_url: String,
    /// Unit price.
    pub price: f64,
}

impl NewCartItem {
    /// Creates a new descriptor.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}

impl From<CartItem> for NewCartItem {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image_url: item.image_url,
            price: item.price,
        }
    }
}
