use cookblink::config::ClientConfig;
use cookblink::{Notice, RecipeClient, RecipeClientBuilder, RecipeError};
use log::{debug, error};
use std::env;
use std::error::Error;

const USAGE: &str = "Usage:
  cookblink search <ingredient>[,<ingredient>...]
  cookblink name <text>
  cookblink show <id>
  cookblink favorites [add <id> | remove <id> | clear]
  cookblink list [add <name> [measure] | add-recipe <id> | toggle <id> | remove <id> | clear]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().ok_or(USAGE)?;

    let config = ClientConfig::load()?;
    debug!("{:#?}", config);
    let client = RecipeClientBuilder::from_config(config).build()?;

    match (command.as_str(), &args[1..]) {
        ("search", rest) if !rest.is_empty() => search(&client, &rest.join(",")).await,
        ("name", rest) if !rest.is_empty() => {
            let recipes = client.service().search_by_name(&rest.join(" ")).await?;
            if recipes.is_empty() {
                println!("No recipes found");
            }
            for recipe in recipes {
                println!("{:>6}  {}", recipe.id, recipe.name);
            }
            Ok(())
        }
        ("show", [id]) => show(&client, id).await,
        ("favorites", rest) => favorites(&client, rest).await,
        ("list", rest) => shopping_list(&client, rest).await,
        _ => Err(USAGE.into()),
    }
}

async fn search(client: &RecipeClient, input: &str) -> Result<(), Box<dyn Error>> {
    let parts: Vec<&str> = input.split(',').collect();
    let ingredients = cookblink::search::normalize_ingredients(&parts[..]);
    let outcome = client.search(&ingredients[..]).await;
    println!("{}", Notice::for_search(&ingredients, &outcome));

    for scored in outcome.unwrap_or_default() {
        let favorite = if client.favorites().contains(&scored.recipe.id) { "*" } else { " " };
        println!(
            "{}{:>6}  [{}] {}",
            favorite, scored.recipe.id, scored.score, scored.recipe.name
        );
    }
    Ok(())
}

async fn show(client: &RecipeClient, id: &str) -> Result<(), Box<dyn Error>> {
    let details = match client.details(id).await {
        Ok(details) => details,
        Err(e) => {
            error!("{}", e);
            println!("{}", Notice::details_failed(&e));
            return Ok(());
        }
    };

    let recipe = &details.recipe;
    println!("{} ({})", recipe.name, recipe.id);
    let tags: Vec<&str> = [recipe.category.as_deref(), recipe.area.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !tags.is_empty() {
        println!("{}", tags.join(" / "));
    }

    println!("\nIngredients ({}):", details.ingredients.len());
    for line in &details.ingredients {
        println!("  - {} {}", line.name, line.measure);
    }
    println!("\n{}", details.instructions);

    if let Some(url) = &details.youtube {
        println!("\nVideo: {}", url);
    }
    if let Some(url) = &details.source {
        println!("Source: {}", url);
    }
    Ok(())
}

async fn favorites(client: &RecipeClient, args: &[String]) -> Result<(), Box<dyn Error>> {
    let favorites = client.favorites();
    match args {
        [] => {
            for recipe in favorites.list() {
                println!("{:>6}  {}", recipe.id, recipe.name);
            }
        }
        [cmd, id] if cmd == "add" => {
            let details = client.details(id).await?;
            favorites.add(&details.recipe);
            println!("{}", Notice::favorite_toggled(&details.recipe, true));
        }
        [cmd, id] if cmd == "remove" => {
            let recipe = favorites
                .list()
                .into_iter()
                .find(|r| &r.id == id)
                .ok_or_else(|| RecipeError::NotFound(id.clone()))?;
            favorites.remove(id);
            println!("{}", Notice::favorite_toggled(&recipe, false));
        }
        [cmd] if cmd == "clear" => {
            favorites.clear();
            println!("{}", Notice::favorites_cleared());
        }
        _ => return Err(USAGE.into()),
    }
    Ok(())
}

async fn shopping_list(client: &RecipeClient, args: &[String]) -> Result<(), Box<dyn Error>> {
    let list = client.shopping_list();
    match args {
        [] => {
            for item in list.list() {
                let mark = if item.checked { "x" } else { " " };
                println!("[{}] {}  {} {}", mark, item.id, item.ingredient, item.measure);
            }
        }
        [cmd, name, measure @ ..] if cmd == "add" => {
            let measure = measure.join(" ");
            let outcome = list.add_item(name, &measure);
            println!("{}", Notice::item_added(name, &outcome));
        }
        [cmd, id] if cmd == "add-recipe" => {
            let added = client.add_recipe_to_shopping_list(id).await?;
            println!("{}", Notice::items_added(added));
        }
        [cmd, id] if cmd == "toggle" => {
            let item = list
                .list()
                .into_iter()
                .find(|item| item.id == *id)
                .ok_or_else(|| RecipeError::NotFound(id.clone()))?;
            let checked = list
                .toggle(id)
                .ok_or_else(|| RecipeError::NotFound(id.clone()))?;
            println!("{}", Notice::item_toggled(&item.ingredient, checked));
        }
        [cmd, id] if cmd == "remove" => {
            if list.remove(id) {
                println!("{}", Notice::item_removed());
            }
        }
        [cmd] if cmd == "clear" => {
            list.clear();
            println!("{}", Notice::list_cleared());
        }
        _ => return Err(USAGE.into()),
    }
    Ok(())
}
