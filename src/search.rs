//! Ingredient search, ranking and recipe lookup on top of the cached transport.

use crate::api::{Endpoint, Transport};
use crate::cache::{CacheKey, ResponseCache};
use crate::model::{MealsEnvelope, Recipe, RecipeDetails, ScoredRecipe};
use crate::RecipeError;
use futures_util::future::join_all;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Lowercase and trim each term, drop blanks, keep the first of any duplicates.
pub fn normalize_ingredients<S: AsRef<str>>(ingredients: &[S]) -> Vec<String> {
    let mut terms: Vec<String> = Vec::with_capacity(ingredients.len());
    for raw in ingredients {
        let term = raw.as_ref().trim().to_lowercase();
        if !term.is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// Merge per-ingredient result lists into one list ranked by match count.
///
/// A recipe scores one point for every list it appears in. Ties keep the
/// order in which recipes were first seen.
pub fn rank_by_match_count(result_sets: Vec<Vec<Recipe>>) -> Vec<ScoredRecipe> {
    let mut position: HashMap<String, usize> = HashMap::new();
    let mut scored: Vec<ScoredRecipe> = Vec::new();

    for recipes in result_sets {
        for recipe in recipes {
            match position.get(&recipe.id) {
                Some(&index) => scored[index].score += 1,
                None => {
                    position.insert(recipe.id.clone(), scored.len());
                    scored.push(ScoredRecipe { recipe, score: 1 });
                }
            }
        }
    }

    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// Recipe search service: every upstream call goes through the response cache.
pub struct RecipeService {
    transport: Arc<dyn Transport>,
    cache: Arc<ResponseCache>,
}

impl RecipeService {
    pub fn new(transport: Arc<dyn Transport>, cache: Arc<ResponseCache>) -> Self {
        Self { transport, cache }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Drop every cached response, forcing fresh fetches
    pub fn clear_cache(&self) {
        info!("Clearing response cache ({} entries)", self.cache.len());
        self.cache.clear();
    }

    /// Serve from cache when fresh, otherwise fetch, decode and remember the payload.
    ///
    /// Only payloads that decode into the expected envelope are cached.
    async fn fetch_cached<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        param: &str,
    ) -> Result<MealsEnvelope<T>, RecipeError> {
        let key = CacheKey::new(endpoint.operation(), param);
        if let Some(payload) = self.cache.get(&key) {
            return Ok(serde_json::from_value(payload)?);
        }

        debug!(
            "Cache miss for {}, asking {}",
            key,
            self.transport.transport_name()
        );
        let payload = self.transport.get_json(endpoint, param).await?;
        let envelope: MealsEnvelope<T> = serde_json::from_value(payload.clone()).map_err(|e| {
            warn!("Unexpected response shape for {}: {}", key, e);
            e
        })?;
        self.cache.put(key, payload);
        Ok(envelope)
    }

    async fn fetch_recipes(&self, endpoint: Endpoint, param: &str) -> Result<Vec<Recipe>, RecipeError> {
        let envelope: MealsEnvelope<Recipe> = self.fetch_cached(endpoint, param).await?;
        Ok(envelope.into_vec())
    }

    /// Recipes that use one ingredient, in the order the upstream lists them
    pub async fn search_by_ingredient(&self, ingredient: &str) -> Result<Vec<Recipe>, RecipeError> {
        let term = ingredient.trim().to_lowercase();
        if term.is_empty() {
            return Err(RecipeError::EmptyQuery);
        }
        self.fetch_recipes(Endpoint::FilterByIngredient, &term).await
    }

    /// Recipes matching any of the given ingredients, most matches first.
    ///
    /// All lookups run concurrently. If any of them fails the whole search
    /// fails with the first error in ingredient order and no partial list.
    pub async fn search_by_ingredients<S: AsRef<str>>(
        &self,
        ingredients: &[S],
    ) -> Result<Vec<ScoredRecipe>, RecipeError> {
        let terms = normalize_ingredients(ingredients);

        match terms.as_slice() {
            [] => Err(RecipeError::EmptyQuery),
            [single] => {
                let recipes = self.search_by_ingredient(single).await?;
                info!("Found {} recipes for '{}'", recipes.len(), single);
                Ok(recipes
                    .into_iter()
                    .map(|recipe| ScoredRecipe { recipe, score: 1 })
                    .collect())
            }
            _ => {
                let lookups = terms
                    .iter()
                    .map(|term| self.fetch_recipes(Endpoint::FilterByIngredient, term));
                let results = join_all(lookups).await;

                let mut result_sets = Vec::with_capacity(results.len());
                for (term, result) in terms.iter().zip(results) {
                    match result {
                        Ok(recipes) => result_sets.push(recipes),
                        Err(e) => {
                            warn!("Lookup for '{}' failed: {}", term, e);
                            return Err(e);
                        }
                    }
                }

                let ranked = rank_by_match_count(result_sets);
                info!(
                    "Found {} recipes for {} ingredients",
                    ranked.len(),
                    terms.len()
                );
                Ok(ranked)
            }
        }
    }

    /// Recipes whose name matches, in upstream order
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Recipe>, RecipeError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecipeError::EmptyQuery);
        }
        self.fetch_recipes(Endpoint::SearchByName, name).await
    }

    /// Full recipe, including the normalized ingredient list
    pub async fn recipe_details(&self, id: &str) -> Result<RecipeDetails, RecipeError> {
        let id = id.trim();
        let envelope: MealsEnvelope<Map<String, Value>> =
            self.fetch_cached(Endpoint::Lookup, id).await?;

        let raw = envelope
            .into_vec()
            .into_iter()
            .next()
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))?;

        Ok(RecipeDetails::from_raw(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: format!("Recipe {}", id),
            thumbnail: format!("{}.jpg", id),
            category: None,
            area: None,
        }
    }

    fn ids(ranked: &[ScoredRecipe]) -> Vec<&str> {
        ranked.iter().map(|s| s.recipe.id.as_str()).collect()
    }

    #[test]
    fn test_normalize_ingredients() {
        let terms = normalize_ingredients(&[" Chicken", "rice ", "CHICKEN", "", "  "]);
        assert_eq!(terms, vec!["chicken", "rice"]);
    }

    #[test]
    fn test_rank_shared_recipe_first() {
        let ranked = rank_by_match_count(vec![
            vec![recipe("A"), recipe("B"), recipe("C")],
            vec![recipe("B"), recipe("D")],
        ]);

        assert_eq!(ids(&ranked), vec!["B", "A", "C", "D"]);
        assert_eq!(ranked[0].score, 2);
        assert!(ranked[1..].iter().all(|s| s.score == 1));
    }

    #[test]
    fn test_rank_ties_keep_first_seen_order() {
        let ranked = rank_by_match_count(vec![
            vec![recipe("X"), recipe("Y")],
            vec![recipe("Z"), recipe("Y")],
            vec![recipe("Z"), recipe("X")],
        ]);

        assert_eq!(ids(&ranked), vec!["X", "Y", "Z"]);
        assert!(ranked.iter().all(|s| s.score == 2));
    }

    #[test]
    fn test_rank_empty_sets() {
        assert!(rank_by_match_count(vec![vec![], vec![]]).is_empty());
    }
}
