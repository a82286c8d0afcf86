//! Short user-facing messages describing the outcome of an action.

use crate::model::{Recipe, ScoredRecipe};
use crate::RecipeError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notice {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notice {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Outcome of an ingredient search
    pub fn for_search(
        ingredients: &[String],
        outcome: &Result<Vec<ScoredRecipe>, RecipeError>,
    ) -> Self {
        match outcome {
            Ok(recipes) if recipes.is_empty() => Notice::error(
                "No recipes found",
                format!(
                    "No recipes found for \"{}\". Try different ingredients!",
                    ingredients.join(", ")
                ),
            ),
            Ok(recipes) => {
                let scope = match ingredients {
                    [single] => format!(" for \"{}\"", single),
                    _ => " matching your ingredients".to_string(),
                };
                Notice::info(
                    "Recipes found!",
                    format!("Found {} delicious recipes{}", recipes.len(), scope),
                )
            }
            Err(e) => Notice::error("Search failed", e.to_string()),
        }
    }

    pub fn details_failed(error: &RecipeError) -> Self {
        Notice::error("Error loading recipe", error.to_string())
    }

    pub fn favorite_toggled(recipe: &Recipe, now_favorite: bool) -> Self {
        if now_favorite {
            Notice::info(
                "Added to favorites",
                format!("{} added to your favorites", recipe.name),
            )
        } else {
            Notice::info(
                "Removed from favorites",
                format!("{} removed from your favorites", recipe.name),
            )
        }
    }

    pub fn favorites_cleared() -> Self {
        Notice::info("Favorites cleared", "All favorites have been removed")
    }

    /// Outcome of adding one item to the shopping list
    pub fn item_added<T>(ingredient: &str, outcome: &Result<T, RecipeError>) -> Self {
        match outcome {
            Ok(_) => Notice::info(
                "Added to shopping list",
                format!("{} added to your shopping list", ingredient),
            ),
            Err(RecipeError::AlreadyInList(_)) => Notice::error(
                "Item already in list",
                format!("{} is already in your shopping list", ingredient),
            ),
            Err(e) => Notice::error("Error", e.to_string()),
        }
    }

    pub fn items_added(count: usize) -> Self {
        if count == 0 {
            return Notice::info(
                "No new items",
                "All ingredients are already in your shopping list",
            );
        }
        let plural = if count > 1 { "s" } else { "" };
        Notice::info(
            "Added to shopping list",
            format!("{} ingredient{} added to your shopping list", count, plural),
        )
    }

    /// New checked state of a shopping list item
    pub fn item_toggled(ingredient: &str, checked: bool) -> Self {
        if checked {
            Notice::info("Item checked", format!("{} marked as bought", ingredient))
        } else {
            Notice::info("Item unchecked", format!("{} marked as still needed", ingredient))
        }
    }

    pub fn item_removed() -> Self {
        Notice::info("Item removed", "Item removed from shopping list")
    }

    pub fn list_cleared() -> Self {
        Notice::info("Shopping list cleared", "All items removed from shopping list")
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
