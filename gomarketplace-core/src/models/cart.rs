//! The cart collection and its reducer.
//!
//! All mutation goes through [`Cart::apply`], a pure function from the
//! current cart and a [`CartEvent`] to the next cart. Stores persist the
//! value it returns, never a previously captured one.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::item::{CartItem, NewCartItem};
use crate::error::CoreError;

// ============================================================================
// Events
// ============================================================================

/// A mutation request against a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CartEvent {
    /// Add a product, or bump its quantity and overwrite its fields if present.
    Add(NewCartItem),
    /// Raise the quantity of a line by one.
    Increment(String),
    /// Lower the quantity of a line by one, removing it at 1.
    Decrement(String),
    /// Remove every line.
    Clear,
}

impl CartEvent {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CartEvent::Add(_) => "add",
            CartEvent::Increment(_) => "increment",
            CartEvent::Decrement(_) => "decrement",
            CartEvent::Clear => "clear",
        }
    }

    /// The item id this event targets, if any.
    pub fn target_id(&self) -> Option<&str> {
        match self {
            CartEvent::Add(item) => Some(&item.id),
            CartEvent::Increment(id) | CartEvent::Decrement(id) => Some(id),
            CartEvent::Clear => None,
        }
    }
}

// ============================================================================
// Totals
// ============================================================================

/// Aggregate figures for display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    /// Number of distinct lines.
    pub lines: usize,
    /// Sum of all quantities.
    pub quantity: u64,
    /// Sum of `price * quantity` over all lines.
    pub price: f64,
}

// ============================================================================
// Cart
// ============================================================================

/// Ordered collection of cart lines with unique ids.
///
/// Serializes as a bare JSON array of [`CartItem`]s.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from lines, checking the id and quantity invariants.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` if any line is invalid or two lines
    /// share an id.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, CoreError> {
        let cart = Self { items };
        cart.validate()?;
        Ok(cart)
    }

    /// Checks every line and the id uniqueness invariant.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` describing the first violation.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            item.validate()?;
            if !seen.insert(item.id.as_str()) {
                return Err(CoreError::InvalidData(format!(
                    "duplicate item id: {}",
                    item.id
                )));
            }
        }
        Ok(())
    }

    /// Lines in order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Consumes the cart, returning its lines.
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a line by id.
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns true if a line with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of all line totals.
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Aggregate figures.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            lines: self.len(),
            quantity: self.total_quantity(),
            price: self.total_price(),
        }
    }

    // ========================================================================
    // Reducer
    // ========================================================================

    /// Computes the cart that results from applying `event`.
    ///
    /// Events that target a missing id leave the cart unchanged, as do
    /// events [`Cart::try_apply`] rejects.
    #[must_use]
    pub fn apply(&self, event: &CartEvent) -> Cart {
        self.try_apply(event).unwrap_or_else(|_| self.clone())
    }

    /// Computes the cart that results from applying `event`, rejecting
    /// events whose result would break a cart invariant.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` if an added product has an empty id
    /// or a non-finite price, or if a quantity would exceed `u32::MAX`.
    pub fn try_apply(&self, event: &CartEvent) -> Result<Cart, CoreError> {
        let mut next = self.clone();
        match event {
            CartEvent::Add(candidate) => next.add(candidate)?,
            CartEvent::Increment(id) => next.increment(id)?,
            CartEvent::Decrement(id) => next.decrement(id),
            CartEvent::Clear => next.items.clear(),
        }
        Ok(next)
    }

    fn add(&mut self, candidate: &NewCartItem) -> Result<(), CoreError> {
        match self.items.iter_mut().find(|item| item.id == candidate.id) {
            // Fields are overwritten from the candidate, not merged.
            Some(existing) => {
                let line = CartItem::with_quantity(candidate.clone(), bump(existing)?);
                line.validate()?;
                *existing = line;
            }
            None => {
                let line = CartItem::from_new(candidate.clone());
                line.validate()?;
                self.items.push(line);
            }
        }
        Ok(())
    }

    fn increment(&mut self, id: &str) -> Result<(), CoreError> {
        for item in self.items.iter_mut().filter(|item| item.id == id) {
            item.quantity = bump(item)?;
        }
        Ok(())
    }

    fn decrement(&mut self, id: &str) {
        let Some(found) = self.get(id) else {
            return;
        };

        if found.quantity <= 1 {
            self.items.retain(|item| item.id != id);
        } else {
            for item in self.items.iter_mut().filter(|item| item.id == id) {
                item.quantity -= 1;
            }
        }
    }
}

fn bump(item: &CartItem) -> Result<u32, CoreError> {
    item.quantity.checked_add(1).ok_or_else(|| {
        CoreError::InvalidData(format!("item {} quantity would overflow", item.id))
    })
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
