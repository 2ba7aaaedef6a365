//! Integration tests for the cart reducer, codec and storage trait.

use async_trait::async_trait;
use gomarketplace_core::{
    codec, Cart, CartEvent, CoreError, KeyValueStore, NewCartItem, DEFAULT_STORAGE_KEY,
};
use std::collections::HashMap;
use std::sync::Mutex;

#[test]
fn test_add_add_decrement_decrement_scenario() {
    let shirt = NewCartItem::new("a", "Shirt", "u", 10.0);

    let cart = Cart::new().apply(&CartEvent::Add(shirt.clone()));
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get("a").unwrap().quantity, 1);

    let cart = cart.apply(&CartEvent::Add(shirt));
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get("a").unwrap().quantity, 2);
    assert_eq!(cart.get("a").unwrap().title, "Shirt");

    let cart = cart.apply(&CartEvent::Decrement("a".to_string()));
    assert_eq!(cart.get("a").unwrap().quantity, 1);

    let cart = cart.apply(&CartEvent::Decrement("a".to_string()));
    assert!(cart.is_empty());
}

/// Minimal backend used to check the trait contract from outside the crate.
#[derive(Default)]
struct MapStore {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MapStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn test_cart_persists_through_trait_object() {
    let store: Box<dyn KeyValueStore> = Box::new(MapStore::default());
    assert_eq!(store.backend_name(), "custom");
    assert!(store.get(DEFAULT_STORAGE_KEY).await.unwrap().is_none());

    let cart = Cart::new()
        .apply(&CartEvent::Add(NewCartItem::new("a", "Shirt", "u", 10.0)))
        .apply(&CartEvent::Add(NewCartItem::new("b", "Mug", "m", 3.0)));
    store
        .set(DEFAULT_STORAGE_KEY, &codec::encode(&cart).unwrap())
        .await
        .unwrap();

    let blob = store.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
    assert_eq!(codec::decode(&blob).unwrap(), cart);
}
