mod bus;
mod favorites;
mod kv;
mod shopping;

pub use bus::{ChangeBus, Subscription};
pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use shopping::{ShoppingList, SHOPPING_LIST_KEY};

use crate::RecipeError;
use log::error;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Shared persistence context: the key-value backend plus its change bus.
///
/// Cloning is cheap, and every clone (and every store built from one)
/// observes the same data and the same notifications.
#[derive(Clone)]
pub struct Storage {
    kv: Arc<dyn KeyValueStore>,
    bus: Arc<ChangeBus>,
}

impl Storage {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            bus: Arc::new(ChangeBus::new()),
        }
    }

    /// File-backed storage under `dir`
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, RecipeError> {
        Ok(Self::new(Arc::new(FileStore::open(dir)?)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    pub fn favorites(&self) -> FavoritesStore {
        FavoritesStore::new(self.clone())
    }

    pub fn shopping_list(&self) -> ShoppingList {
        ShoppingList::new(self.clone())
    }

    /// Read a JSON array. Missing, unreadable or corrupt data reads as empty.
    pub(crate) fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!("Error loading {}: {}", key, e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            error!("Error loading {}: {}", key, e);
            Vec::new()
        })
    }

    /// Persist the whole array and tell observers. A failed write is logged and dropped.
    pub(crate) fn save_list<T: Serialize>(&self, key: &str, items: &[T]) {
        let written = serde_json::to_string(items)
            .map_err(RecipeError::from)
            .and_then(|json| self.kv.set(key, &json));

        match written {
            Ok(()) => self.bus.notify(key),
            Err(e) => error!("Error saving {}: {}", key, e),
        }
    }

    /// Subscribe to changes of a single key
    pub(crate) fn subscribe_key<F>(&self, key: &'static str, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.bus.subscribe(move |changed| {
            if changed == key {
                callback();
            }
        })
    }
}
