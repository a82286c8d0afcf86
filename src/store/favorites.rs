use crate::model::Recipe;
use crate::store::{Storage, Subscription};
use log::info;

pub const FAVORITES_KEY: &str = "cookblink-favorites";

/// Saved recipes, unique by id, in the order they were added
#[derive(Clone)]
pub struct FavoritesStore {
    storage: Storage,
}

impl FavoritesStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn list(&self) -> Vec<Recipe> {
        self.storage.load_list(FAVORITES_KEY)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.list().iter().any(|fav| fav.id == id)
    }

    /// Returns false when the recipe was already a favorite
    pub fn add(&self, recipe: &Recipe) -> bool {
        let mut favorites = self.list();
        if favorites.iter().any(|fav| fav.id == recipe.id) {
            return false;
        }

        favorites.push(recipe.clone());
        self.storage.save_list(FAVORITES_KEY, &favorites);
        info!("Added {} to favorites", recipe.name);
        true
    }

    /// Returns false when nothing was removed
    pub fn remove(&self, id: &str) -> bool {
        let mut favorites = self.list();
        let before = favorites.len();
        favorites.retain(|fav| fav.id != id);
        if favorites.len() == before {
            return false;
        }

        self.storage.save_list(FAVORITES_KEY, &favorites);
        true
    }

    /// Add if absent, remove if present. Returns whether it is now a favorite.
    pub fn toggle(&self, recipe: &Recipe) -> bool {
        if self.contains(&recipe.id) {
            self.remove(&recipe.id);
            false
        } else {
            self.add(recipe);
            true
        }
    }

    pub fn clear(&self) {
        self.storage.save_list::<Recipe>(FAVORITES_KEY, &[]);
    }

    /// Called after every persisted change to the favorites
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.storage.subscribe_key(FAVORITES_KEY, callback)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.storage.bus().unsubscribe(subscription)
    }

    pub fn notify(&self) {
        self.storage.bus().notify(FAVORITES_KEY);
    }
}
