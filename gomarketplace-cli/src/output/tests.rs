//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::{format_price, TextFormatter};
    use gomarketplace_core::{Cart, CartEvent, CartItem, NewCartItem};
    use gomarketplace_store::StoreConfig;

    fn sample_cart() -> Cart {
        Cart::new()
            .apply(&CartEvent::Add(NewCartItem::new("a", "Shirt", "u", 10.0)))
            .apply(&CartEvent::Add(NewCartItem::new("b", "Mug", "m", 4.5)))
            .apply(&CartEvent::Increment("a".to_string()))
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(10.0), "$10.00");
        assert_eq!(format_price(4.5), "$4.50");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn test_empty_cart() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_cart(&[], &Cart::new().totals());
        assert!(output.contains("Cart (0 lines)"));
        assert!(output.contains("Your cart is empty"));
    }

    #[test]
    fn test_cart_rows_and_total() {
        let formatter = TextFormatter::new(false);
        let cart = sample_cart();
        let output = formatter.format_cart(cart.items(), &cart.totals());

        assert!(output.contains("Cart (2 lines)"));
        assert!(output.contains("Shirt"));
        assert!(output.contains("$20.00"));
        assert!(output.contains("Total: 3 units"));
        assert!(output.contains("$24.50"));
        // Rows follow cart order.
        assert!(output.find("Shirt").unwrap() < output.find("Mug").unwrap());
    }

    #[test]
    fn test_no_color_has_no_escapes() {
        let formatter = TextFormatter::new(false);
        let cart = sample_cart();
        let output = formatter.format_cart(cart.items(), &cart.totals());
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_color_output_has_escapes() {
        let formatter = TextFormatter::new(true);
        let cart = sample_cart();
        let output = formatter.format_cart(cart.items(), &cart.totals());
        assert!(output.contains("\x1b[1m"));
    }

    #[test]
    fn test_long_title_truncated() {
        let formatter = TextFormatter::new(false);
        let item = CartItem::from_new(NewCartItem::new(
            "x",
            "An extraordinarily long product title that keeps going",
            "u",
            1.0,
        ));
        let row = formatter.format_item(&item);
        assert!(row.contains('…'));
        assert!(!row.contains("keeps going"));
    }

    #[test]
    fn test_change_for_removed_line() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_change("decrement", "a", None);
        assert!(output.contains("(not in cart)"));
    }

    #[test]
    fn test_format_config() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_config(&StoreConfig::default());
        assert!(output.contains("@gomarketplace:products"));
        assert!(output.contains("immediate"));
        assert!(output.contains("recover"));
    }

    #[test]
    fn test_format_error() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.format_error("boom"), "✗ boom");
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::JsonFormatter;
    use gomarketplace_core::{Cart, CartEvent, NewCartItem};

    #[test]
    fn test_format_pretty() {
        let formatter = JsonFormatter::new(true);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let formatter = JsonFormatter::new(false);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_cart_output_shape() {
        let formatter = JsonFormatter::new(false);
        let cart = Cart::new().apply(&CartEvent::Add(NewCartItem::new("a", "Shirt", "u", 10.0)));
        let output = formatter
            .format_cart(cart.items(), &cart.totals(), "@gomarketplace:products", None)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["items"][0]["image_url"], "u");
        assert_eq!(value["items"][0]["quantity"], 1);
        assert_eq!(value["totals"]["lines"], 1);
        assert_eq!(value["storageKey"], "@gomarketplace:products");
        assert!(value.get("lastSaved").is_none());
    }

    #[test]
    fn test_cart_output_includes_last_saved() {
        let formatter = JsonFormatter::new(false);
        let saved = chrono::DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let output = formatter
            .format_cart(&[], &Cart::new().totals(), "k", Some(saved))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["lastSaved"], "2026-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_change_output_omits_missing_item() {
        let formatter = JsonFormatter::new(false);
        let output = formatter
            .format_change("decrement", "a", None, &Cart::new().totals())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["action"], "decrement");
        assert!(value.get("item").is_none());
        assert_eq!(value["totals"]["quantity"], 0);
    }
}
