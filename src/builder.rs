use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::api::{MealDbTransport, Transport};
use crate::cache::{Clock, ResponseCache, SystemClock};
use crate::config::ClientConfig;
use crate::search::RecipeService;
use crate::store::{FavoritesStore, ShoppingList, Storage};
use crate::{RecipeDetails, RecipeError, ScoredRecipe};

/// Where favorites and the shopping list live
#[derive(Clone)]
enum StorageChoice {
    /// Files under a directory
    Dir(PathBuf),
    /// Nothing persisted beyond the process
    Memory,
    /// Caller-provided storage, shared with other handles
    Shared(Storage),
}

/// Builder for configuring a [`RecipeClient`]
pub struct RecipeClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    clock: Option<Arc<dyn Clock>>,
    storage: StorageChoice,
}

impl Default for RecipeClientBuilder {
    fn default() -> Self {
        Self::from_config(ClientConfig::default())
    }
}

impl RecipeClientBuilder {
    /// Start from a loaded configuration
    pub fn from_config(config: ClientConfig) -> Self {
        let storage = StorageChoice::Dir(config.storage.data_dir.clone());
        Self {
            config,
            transport: None,
            clock: None,
            storage,
        }
    }

    /// Set the recipe API base URL
    ///
    /// # Example
    /// ```
    /// use cookblink::RecipeClient;
    ///
    /// let builder = RecipeClient::builder()
    ///     .base_url("http://localhost:8080/api/json/v1/1");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api.base_url = url.into();
        self
    }

    /// Set a timeout for HTTP requests, rounded down to whole seconds (minimum one)
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.config.api.timeout = duration.as_secs().max(1);
        self
    }

    /// How long responses are served from the cache
    ///
    /// # Example
    /// ```
    /// use cookblink::RecipeClient;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeClient::builder()
    ///     .cache_ttl(Duration::from_secs(60));
    /// ```
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.cache.ttl_secs = ttl.as_secs();
        self
    }

    /// Replace the clock used for cache freshness
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use a custom transport instead of HTTP
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Persist favorites and the shopping list under `dir`
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage = StorageChoice::Dir(dir.into());
        self
    }

    /// Keep favorites and the shopping list in memory only
    pub fn in_memory(mut self) -> Self {
        self.storage = StorageChoice::Memory;
        self
    }

    /// Share storage (and its change notifications) with other handles
    pub fn storage(mut self, storage: Storage) -> Self {
        self.storage = StorageChoice::Shared(storage);
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns `RecipeError` if:
    /// - the base URL is empty
    /// - the HTTP client cannot be created
    /// - the data directory cannot be created
    pub fn build(self) -> Result<RecipeClient, RecipeError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                if self.config.api.base_url.trim().is_empty() {
                    return Err(RecipeError::BuilderError(
                        "No base URL specified. Use .base_url() or the api.base_url setting"
                            .to_string(),
                    ));
                }
                Arc::new(MealDbTransport::new(&self.config.api)?) as Arc<dyn Transport>
            }
        };

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let cache = Arc::new(ResponseCache::new(self.config.cache.ttl(), clock));

        let storage = match self.storage {
            StorageChoice::Dir(dir) => {
                debug!("Using data directory {}", dir.display());
                Storage::open(dir)?
            }
            StorageChoice::Memory => Storage::in_memory(),
            StorageChoice::Shared(storage) => storage,
        };

        Ok(RecipeClient {
            service: RecipeService::new(transport, cache),
            storage,
        })
    }
}

/// Recipe search plus the user's saved data
pub struct RecipeClient {
    service: RecipeService,
    storage: Storage,
}

impl RecipeClient {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use cookblink::RecipeClient;
    ///
    /// let builder = RecipeClient::builder();
    /// ```
    pub fn builder() -> RecipeClientBuilder {
        RecipeClientBuilder::default()
    }

    pub fn service(&self) -> &RecipeService {
        &self.service
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn favorites(&self) -> FavoritesStore {
        self.storage.favorites()
    }

    pub fn shopping_list(&self) -> ShoppingList {
        self.storage.shopping_list()
    }

    /// Ranked recipes for the given ingredients
    pub async fn search<S: AsRef<str>>(
        &self,
        ingredients: &[S],
    ) -> Result<Vec<ScoredRecipe>, RecipeError> {
        self.service.search_by_ingredients(ingredients).await
    }

    pub async fn details(&self, id: &str) -> Result<RecipeDetails, RecipeError> {
        self.service.recipe_details(id).await
    }

    /// Put every ingredient of a recipe on the shopping list, skipping ones
    /// already there. Returns how many were added.
    pub async fn add_recipe_to_shopping_list(&self, id: &str) -> Result<usize, RecipeError> {
        let details = self.service.recipe_details(id).await?;
        Ok(self.shopping_list().add_items(&details.ingredients))
    }

    pub fn clear_cache(&self) {
        self.service.clear_cache();
    }
}
