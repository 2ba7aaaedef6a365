//! Text encoding of a cart for storage.
//!
//! The format is a JSON array of objects with the fields `id`, `title`,
//! `image_url`, `price` and `quantity`, in cart order.

use crate::error::CoreError;
use crate::models::{Cart, CartItem};

/// Encodes a cart as compact JSON.
///
/// # Errors
///
/// Returns `CoreError::Serialization` if encoding fails.
pub fn encode(cart: &Cart) -> Result<String, CoreError> {
    Ok(serde_json::to_string(cart)?)
}

/// Decodes a stored blob, checking the cart invariants.
///
/// # Errors
///
/// Returns `CoreError::Serialization` for malformed JSON and
/// `CoreError::InvalidData` for duplicate ids or zero quantities.
pub fn decode(blob: &str) -> Result<Cart, CoreError> {
    let items: Vec<CartItem> = serde_json::from_str(blob)?;
    Cart::from_items(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CartEvent, NewCartItem};

    #[test]
    fn test_roundtrip_preserves_order_and_fields() {
        let cart = Cart::new()
            .apply(&CartEvent::Add(NewCartItem::new("b", "Mug", "m", 4.5)))
            .apply(&CartEvent::Add(NewCartItem::new("a", "Shirt", "u", 10.0)))
            .apply(&CartEvent::Increment("a".to_string()));

        let decoded = decode(&encode(&cart).unwrap()).unwrap();
        assert_eq!(decoded, cart);
        assert_eq!(decoded.items()[0].id, "b");
    }

    #[test]
    fn test_empty_cart_encodes_as_empty_array() {
        assert_eq!(encode(&Cart::new()).unwrap(), "[]");
        assert!(decode("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_wire_format() {
        let blob = r#"[{"id":"a","title":"Shirt","image_url":"u","price":10,"quantity":2}]"#;
        let cart = decode(blob).unwrap();
        let line = cart.get("a").unwrap();
        assert_eq!(line.quantity, 2);
        assert!((line.price - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decode_malformed() {
        assert!(matches!(decode("not json"), Err(CoreError::Serialization(_))));
        assert!(matches!(decode(r#"{"id":"a"}"#), Err(CoreError::Serialization(_))));
    }

    #[test]
    fn test_decode_rejects_zero_quantity() {
        let blob = r#"[{"id":"a","title":"Shirt","image_url":"u","price":1,"quantity":0}]"#;
        assert!(matches!(decode(blob), Err(CoreError::InvalidData(_))));
    }
}
