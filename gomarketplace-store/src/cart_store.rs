//! Persistent cart store.
//!
//! Owns the current [`Cart`], restores it from a [`KeyValueStore`] when
//! opened, and writes the whole cart back after every mutation. UI layers
//! hold a cloned handle, read snapshots, and subscribe to a version channel.

use chrono::{DateTime, Utc};
use gomarketplace_core::{
    codec, Cart, CartEvent, CartItem, CartTotals, KeyValueStore, NewCartItem,
};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::{CartStoreOptions, CorruptDataPolicy, PersistMode, StoreConfig};
use crate::error::StoreError;
use crate::storage::{FileStorage, MemoryStorage};

// ============================================================================
// Inner State
// ============================================================================

/// Internal state for the cart store.
#[derive(Debug, Default)]
struct CartStoreInner {
    /// Current cart.
    cart: Cart,
    /// Bumped on every committed mutation.
    version: u64,
    /// Time of the last successful write.
    last_saved: Option<DateTime<Utc>>,
}

// ============================================================================
// Cart Store
// ============================================================================

/// State store for the shopping cart.
///
/// Cloning yields another handle to the same cart. Mutations are applied
/// one at a time: the state lock is held across the storage write, so
/// writes reach storage in call order.
pub struct CartStore {
    inner: Arc<RwLock<CartStoreInner>>,
    storage: Arc<dyn KeyValueStore>,
    options: Arc<CartStoreOptions>,
    notify: Arc<watch::Sender<u64>>,
}

impl Clone for CartStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            storage: Arc::clone(&self.storage),
            options: Arc::clone(&self.options),
            notify: Arc::clone(&self.notify),
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("backend", &self.storage.backend_name())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Opens a store, restoring the cart saved under the configured key.
    ///
    /// A missing value yields an empty cart. An undecodable value is
    /// handled according to [`CorruptDataPolicy`].
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the read fails, or
    /// `StoreError::Corrupt` if the blob is malformed and the policy is
    /// [`CorruptDataPolicy::Fail`].
    pub async fn open(
        storage: Arc<dyn KeyValueStore>,
        options: CartStoreOptions,
    ) -> Result<Self, StoreError> {
        let key = options.storage_key.as_str();
        let cart = match storage.get(key).await? {
            None => {
                debug!(key, backend = storage.backend_name(), "No stored cart, starting empty");
                Cart::new()
            }
            Some(blob) => match codec::decode(&blob) {
                Ok(cart) => cart,
                Err(e) => match options.corrupt_data {
                    CorruptDataPolicy::Recover => {
                        warn!(key, error = %e, "Stored cart is corrupt, starting empty");
                        Cart::new()
                    }
                    CorruptDataPolicy::Fail => {
                        return Err(StoreError::Corrupt {
                            key: key.to_string(),
                            source: e,
                        });
                    }
                },
            },
        };

        let last_saved = match storage.modified(key).await {
            Ok(modified) => modified.map(DateTime::<Utc>::from),
            Err(e) => {
                debug!(key, error = %e, "Could not read storage modification time");
                None
            }
        };

        info!(
            key,
            backend = storage.backend_name(),
            items = cart.len(),
            mode = %options.persist_mode,
            "Cart loaded"
        );

        let store = Self::from_parts(cart, storage, options);
        store.inner.write().await.last_saved = last_saved;
        Ok(store)
    }

    /// Opens a file-backed store described by `config`.
    ///
    /// # Errors
    ///
    /// Same as [`CartStore::open`], plus `StoreError::Config` for an
    /// invalid configuration.
    pub async fn open_with_config(config: &StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        let storage = Arc::new(FileStorage::new(config.data_dir()));
        Self::open(storage, config.cart_options()).await
    }

    /// Creates an empty store backed by process memory.
    pub fn in_memory() -> Self {
        Self::from_parts(
            Cart::new(),
            Arc::new(MemoryStorage::new()),
            CartStoreOptions::default(),
        )
    }

    fn from_parts(cart: Cart, storage: Arc<dyn KeyValueStore>, options: CartStoreOptions) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            inner: Arc::new(RwLock::new(CartStoreInner {
                cart,
                ..CartStoreInner::default()
            })),
            storage,
            options: Arc::new(options),
            notify: Arc::new(notify),
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Gets a copy of the current cart.
    pub async fn cart(&self) -> Cart {
        self.inner.read().await.cart.clone()
    }

    /// Gets the current lines in order.
    pub async fn items(&self) -> Vec<CartItem> {
        self.inner.read().await.cart.items().to_vec()
    }

    /// Gets one line by id.
    pub async fn get(&self, id: &str) -> Option<CartItem> {
        self.inner.read().await.cart.get(id).cloned()
    }

    /// Gets line, quantity and price totals.
    pub async fn totals(&self) -> CartTotals {
        self.inner.read().await.cart.totals()
    }

    /// Current version; increases by one per committed mutation.
    pub async fn version(&self) -> u64 {
        self.inner.read().await.version
    }

    /// Time of the last successful storage write. Right after opening this
    /// is the backend's modification time, when it tracks one.
    pub async fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.last_saved
    }

    /// Key the cart is stored under.
    pub fn storage_key(&self) -> &str {
        &self.options.storage_key
    }

    /// Which value mutations persist.
    pub fn persist_mode(&self) -> PersistMode {
        self.options.persist_mode
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Adds a product, or bumps its quantity and overwrites its fields.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` wrapping `CoreError::InvalidData` for an
    /// empty id or a non-finite price, or if the write fails.
    pub async fn add_to_cart(&self, item: NewCartItem) -> Result<(), StoreError> {
        self.dispatch(CartEvent::Add(item)).await
    }

    /// Raises the quantity of a line by one. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write fails.
    pub async fn increment(&self, id: &str) -> Result<(), StoreError> {
        self.dispatch(CartEvent::Increment(id.to_string())).await
    }

    /// Lowers the quantity of a line by one, removing it at quantity 1.
    /// Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write fails.
    pub async fn decrement(&self, id: &str) -> Result<(), StoreError> {
        self.dispatch(CartEvent::Decrement(id.to_string())).await
    }

    /// Removes every line.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write fails.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.dispatch(CartEvent::Clear).await
    }

    /// Applies an event and persists the cart.
    ///
    /// In [`PersistMode::Immediate`] the new cart is written first and only
    /// installed if the write succeeds. In [`PersistMode::Lagged`] the new
    /// cart is installed, then the previous cart is written.
    ///
    /// Events whose result would break a cart invariant (an empty id, a
    /// non-finite price, a quantity overflow) are rejected before anything
    /// is written, in either mode.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the event is rejected, or if
    /// encoding or the write fails.
    pub async fn dispatch(&self, event: CartEvent) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let next = match inner.cart.try_apply(&event) {
            Ok(next) => next,
            Err(e) => {
                warn!(event = event.kind(), error = %e, "Rejected cart event");
                return Err(e.into());
            }
        };

        let written = match self.options.persist_mode {
            PersistMode::Immediate => {
                self.persist(&next).await?;
                inner.cart = next;
                Ok(())
            }
            PersistMode::Lagged => {
                let previous = std::mem::replace(&mut inner.cart, next);
                self.persist(&previous).await
            }
        };

        inner.version += 1;
        if written.is_ok() {
            inner.last_saved = Some(Utc::now());
        }
        self.notify.send_replace(inner.version);

        debug!(
            event = event.kind(),
            id = event.target_id().unwrap_or("-"),
            items = inner.cart.len(),
            version = inner.version,
            "Cart updated"
        );
        written
    }

    /// Writes the current cart to storage.
    ///
    /// In [`PersistMode::Lagged`] storage trails memory by one mutation;
    /// callers that exit after a mutation flush first so the last change is
    /// not lost. In [`PersistMode::Immediate`] this rewrites what is already
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if encoding or the write fails.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        self.persist(&inner.cart).await?;
        inner.last_saved = Some(Utc::now());
        Ok(())
    }

    /// Runs [`CartStore::dispatch`] on a background task.
    ///
    /// The handle resolves to the outcome of the write, so callers that
    /// fire and move on can still observe storage failures later.
    pub fn spawn_dispatch(&self, event: CartEvent) -> JoinHandle<Result<(), StoreError>> {
        let store = self.clone();
        tokio::spawn(async move { store.dispatch(event).await })
    }

    async fn persist(&self, cart: &Cart) -> Result<(), StoreError> {
        let key = self.options.storage_key.as_str();
        let blob = codec::encode(cart)?;
        if let Err(e) = self.storage.set(key, &blob).await {
            warn!(key, error = %e, "Failed to persist cart");
            return Err(e.into());
        }
        debug!(key, items = cart.len(), "Cart persisted");
        Ok(())
    }

    // ========================================================================
    // Observable
    // ========================================================================

    /// Subscribes to cart changes. The value is the store version.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }
}

// ============================================================================
// Tests
// ============================================================================
