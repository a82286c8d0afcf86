pub mod api;
pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod notice;
pub mod search;
pub mod store;

// Re-export commonly used types
pub use builder::{RecipeClient, RecipeClientBuilder};
pub use cache::{Clock, ManualClock, ResponseCache, SystemClock};
pub use error::RecipeError;
pub use model::{IngredientLine, Recipe, RecipeDetails, ScoredRecipe, ShoppingItem};
pub use notice::{Notice, Severity};
pub use search::RecipeService;
pub use store::{FavoritesStore, ShoppingList, Storage};

/// Search recipes for the given ingredients with the default configuration.
///
/// Saved data is kept in memory only; use [`RecipeClient::builder`] for
/// persistence or a custom endpoint.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = cookblink::search_recipes(&["chicken", "rice"]).await?;
/// for scored in recipes {
///     println!("{} ({})", scored.recipe.name, scored.score);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes<S: AsRef<str>>(
    ingredients: &[S],
) -> Result<Vec<ScoredRecipe>, RecipeError> {
    let client = RecipeClient::builder().in_memory().build()?;
    client.search(ingredients).await
}

/// Fetch one recipe with its ingredient list using the default configuration.
pub async fn fetch_recipe_details(id: &str) -> Result<RecipeDetails, RecipeError> {
    let client = RecipeClient::builder().in_memory().build()?;
    client.details(id).await
}
