use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upstream stores ingredients in numbered slots `strIngredient1..=20`
pub const MAX_INGREDIENT_SLOTS: usize = 20;

/// Recipe summary as returned by ingredient and name searches.
///
/// Field names follow the upstream payload so that persisted favorites
/// round-trip with what the API hands out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default, deserialize_with = "null_as_empty")]
    pub thumbnail: String,
    #[serde(rename = "strCategory", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "strArea", default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A recipe together with how many of the searched ingredients it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredRecipe {
    pub recipe: Recipe,
    pub score: usize,
}

/// One ingredient line of a recipe, e.g. `("Salt", "1 tsp")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub measure: String,
}

/// Full recipe as returned by lookup by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeDetails {
    pub recipe: Recipe,
    pub instructions: String,
    pub youtube: Option<String>,
    pub source: Option<String>,
    pub ingredients: Vec<IngredientLine>,
}

/// Envelope every upstream endpoint wraps its results in.
#[derive(Debug, Deserialize)]
pub struct MealsEnvelope<T> {
    pub meals: Option<Vec<T>>,
}

impl<T> MealsEnvelope<T> {
    /// `meals: null` means no match, which is an empty list rather than an error
    pub fn into_vec(self) -> Vec<T> {
        self.meals.unwrap_or_default()
    }
}

impl RecipeDetails {
    /// Build details from one raw upstream meal object, folding the numbered
    /// ingredient/measure slots into an ordered list.
    pub fn from_raw(raw: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        let recipe: Recipe = serde_json::from_value(Value::Object(raw.clone()))?;

        let ingredients = (1..=MAX_INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let name = non_empty(raw, &format!("strIngredient{}", slot))?;
                let measure = non_empty(raw, &format!("strMeasure{}", slot)).unwrap_or_default();
                Some(IngredientLine { name, measure })
            })
            .collect();

        Ok(RecipeDetails {
            recipe,
            instructions: non_empty(raw, "strInstructions").unwrap_or_default(),
            youtube: non_empty(raw, "strYoutube"),
            source: non_empty(raw, "strSource"),
            ingredients,
        })
    }
}

/// Trimmed string value of `key`, or `None` when missing, null or blank
fn non_empty(raw: &Map<String, Value>, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// An entry on the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: String,
    pub ingredient: String,
    pub measure: String,
    pub checked: bool,
}
