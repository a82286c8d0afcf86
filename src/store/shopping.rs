use crate::model::{IngredientLine, ShoppingItem};
use crate::store::{Storage, Subscription};
use crate::RecipeError;
use log::info;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const SHOPPING_LIST_KEY: &str = "cookblink-shopping-list";

static LAST_ITEM_ID: AtomicU64 = AtomicU64::new(0);

/// Millisecond timestamp, bumped past every id handed out by this process and
/// every id already saved, so a clock that stepped back cannot reuse one.
fn next_item_id(saved: &[ShoppingItem]) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let floor = saved
        .iter()
        .filter_map(|item| item.id.parse::<u64>().ok())
        .max()
        .map_or(now, |max_saved| now.max(max_saved + 1));

    let previous = LAST_ITEM_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(floor.max(last + 1))
        })
        .unwrap_or_default();

    floor.max(previous + 1).to_string()
}

fn same_ingredient(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Ingredients to buy, in the order they were added
#[derive(Clone)]
pub struct ShoppingList {
    storage: Storage,
}

impl ShoppingList {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn list(&self) -> Vec<ShoppingItem> {
        self.storage.load_list(SHOPPING_LIST_KEY)
    }

    /// Append an item unless one with the same name (ignoring case) is already listed
    pub fn add_item(&self, ingredient: &str, measure: &str) -> Result<ShoppingItem, RecipeError> {
        let mut items = self.list();
        if items.iter().any(|item| same_ingredient(&item.ingredient, ingredient)) {
            return Err(RecipeError::AlreadyInList(ingredient.to_string()));
        }

        let item = ShoppingItem {
            id: next_item_id(&items),
            ingredient: ingredient.to_string(),
            measure: measure.to_string(),
            checked: false,
        };
        items.push(item.clone());
        self.storage.save_list(SHOPPING_LIST_KEY, &items);
        info!("Added {} to shopping list", ingredient);
        Ok(item)
    }

    /// Append every line not already listed. Returns how many were added.
    pub fn add_items(&self, lines: &[IngredientLine]) -> usize {
        let mut items = self.list();
        let mut added = 0;

        for line in lines {
            if items.iter().any(|item| same_ingredient(&item.ingredient, &line.name)) {
                continue;
            }
            let id = next_item_id(&items);
            items.push(ShoppingItem {
                id,
                ingredient: line.name.clone(),
                measure: line.measure.clone(),
                checked: false,
            });
            added += 1;
        }

        if added > 0 {
            self.storage.save_list(SHOPPING_LIST_KEY, &items);
            info!("Added {} ingredients to shopping list", added);
        }
        added
    }

    /// Flip the checked flag. Returns the new value, or `None` for an unknown id.
    pub fn toggle(&self, id: &str) -> Option<bool> {
        let checked = !self.list().iter().find(|item| item.id == id)?.checked;
        self.set_checked(id, checked);
        Some(checked)
    }

    /// Returns false for an unknown id
    pub fn set_checked(&self, id: &str, checked: bool) -> bool {
        let mut items = self.list();
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return false;
        };

        item.checked = checked;
        self.storage.save_list(SHOPPING_LIST_KEY, &items);
        true
    }

    /// Returns false when nothing was removed
    pub fn remove(&self, id: &str) -> bool {
        let mut items = self.list();
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return false;
        }

        self.storage.save_list(SHOPPING_LIST_KEY, &items);
        true
    }

    pub fn clear(&self) {
        self.storage.save_list::<ShoppingItem>(SHOPPING_LIST_KEY, &[]);
    }

    /// Called after every persisted change to the list
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.storage.subscribe_key(SHOPPING_LIST_KEY, callback)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.storage.bus().unsubscribe(subscription)
    }

    pub fn notify(&self) {
        self.storage.bus().notify(SHOPPING_LIST_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn line(name: &str, measure: &str) -> IngredientLine {
        IngredientLine {
            name: name.to_string(),
            measure: measure.to_string(),
        }
    }

    #[test]
    fn test_duplicate_name_is_rejected_case_insensitively() {
        let list = Storage::in_memory().shopping_list();
        list.add_item("Salt", "1 tsp").unwrap();

        let result = list.add_item("salt", "2 tsp");
        assert!(matches!(result, Err(RecipeError::AlreadyInList(ref name)) if name == "salt"));

        let items = list.list();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].ingredient, "Salt");
        assert_eq!(items[0].measure, "1 tsp");
        assert!(!items[0].checked);
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let list = Storage::in_memory().shopping_list();
        let a = list.add_item("Eggs", "2").unwrap();
        let b = list.add_item("Milk", "1 cup").unwrap();
        let c = list.add_item("Flour", "200g").unwrap();

        let ids: Vec<u64> = [a, b, c].iter().map(|i| i.id.parse().unwrap()).collect();
        assert!(ids[0] < ids[1] && ids[1] < ids[2]);
    }

    #[test]
    fn test_new_ids_follow_saved_ids() {
        let kv = Arc::new(MemoryStore::new());
        let future_id = "99999999999999";
        kv.set(
            SHOPPING_LIST_KEY,
            &format!(
                r#"[{{"id":"{}","ingredient":"Yeast","measure":"7g","checked":false}}]"#,
                future_id
            ),
        )
        .unwrap();
        let list = Storage::new(kv).shopping_list();

        let item = list.add_item("Flour", "500g").unwrap();
        let added = list.add_items(&[line("Water", "300ml"), line("Salt", "1 tsp")]);
        assert_eq!(added, 2);

        let ids: Vec<u64> = list.list().iter().map(|i| i.id.parse().unwrap()).collect();
        assert_eq!(ids[0], future_id.parse::<u64>().unwrap());
        assert_eq!(ids[1], item.id.parse::<u64>().unwrap());
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_toggle_set_checked_remove() {
        let list = Storage::in_memory().shopping_list();
        let item = list.add_item("Butter", "50g").unwrap();

        assert_eq!(list.toggle(&item.id), Some(true));
        assert!(list.list()[0].checked);
        assert_eq!(list.toggle(&item.id), Some(false));
        assert_eq!(list.toggle("nope"), None);

        assert!(list.set_checked(&item.id, true));
        assert!(!list.set_checked("nope", true));
        assert!(list.list()[0].checked);

        assert!(list.remove(&item.id));
        assert!(!list.remove(&item.id));
        assert!(list.list().is_empty());
    }

    #[test]
    fn test_add_items_skips_existing_and_batch_duplicates() {
        let list = Storage::in_memory().shopping_list();
        list.add_item("Onion", "1").unwrap();

        let added = list.add_items(&[
            line("onion", "2"),
            line("Garlic", "3 cloves"),
            line("GARLIC", "1 clove"),
            line("Olive Oil", "2 tbs"),
        ]);

        assert_eq!(added, 2);
        let names: Vec<String> = list.list().into_iter().map(|i| i.ingredient).collect();
        assert_eq!(names, vec!["Onion", "Garlic", "Olive Oil"]);

        assert_eq!(list.add_items(&[line("olive oil", "")]), 0);
    }

    #[test]
    fn test_clear() {
        let list = Storage::in_memory().shopping_list();
        list.add_item("Rice", "1 cup").unwrap();
        list.clear();
        assert!(list.list().is_empty());
        // cleared names can be added again
        assert!(list.add_item("rice", "2 cups").is_ok());
    }
}
