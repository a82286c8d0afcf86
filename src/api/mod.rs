mod mealdb;

pub use mealdb::MealDbTransport;

use crate::RecipeError;
use async_trait::async_trait;
use serde_json::Value;

/// Upstream operations the client relies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `filter.php?i=` recipes using one ingredient
    FilterByIngredient,
    /// `lookup.php?i=` full recipe by id
    Lookup,
    /// `search.php?s=` recipes by name
    SearchByName,
}

impl Endpoint {
    /// Operation name used in cache keys
    pub fn operation(&self) -> &'static str {
        match self {
            Endpoint::FilterByIngredient => "filter",
            Endpoint::Lookup => "lookup",
            Endpoint::SearchByName => "search",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::FilterByIngredient => "filter.php",
            Endpoint::Lookup => "lookup.php",
            Endpoint::SearchByName => "search.php",
        }
    }

    pub fn query_param(&self) -> &'static str {
        match self {
            Endpoint::FilterByIngredient | Endpoint::Lookup => "i",
            Endpoint::SearchByName => "s",
        }
    }
}

/// Fetches raw JSON from the recipe database
#[async_trait]
pub trait Transport: Send + Sync {
    /// Name used in log lines
    fn transport_name(&self) -> &str;

    /// Issue one request and return the decoded JSON body
    async fn get_json(&self, endpoint: Endpoint, param: &str) -> Result<Value, RecipeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::FilterByIngredient.path(), "filter.php");
        assert_eq!(Endpoint::Lookup.path(), "lookup.php");
        assert_eq!(Endpoint::SearchByName.path(), "search.php");
        assert_eq!(Endpoint::SearchByName.query_param(), "s");
        assert_eq!(Endpoint::Lookup.operation(), "lookup");
    }
}
