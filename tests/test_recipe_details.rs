use cookblink::{IngredientLine, Notice, RecipeClient, RecipeError};
use mockito::Matcher;

const TERIYAKI: &str = r#"
{
    "meals": [{
        "idMeal": "52772",
        "strMeal": "Teriyaki Chicken Casserole",
        "strCategory": "Chicken",
        "strArea": "Japanese",
        "strInstructions": "Preheat oven to 350 F.\r\nCombine soy sauce and water.",
        "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
        "strYoutube": "https://www.youtube.com/watch?v=4aZr5hZXP_s",
        "strSource": null,
        "strIngredient1": "soy sauce",
        "strIngredient2": "water",
        "strIngredient3": "brown sugar",
        "strIngredient4": "",
        "strIngredient5": null,
        "strMeasure1": "3/4 cup",
        "strMeasure2": "1/2 cup",
        "strMeasure3": "1/4 cup ",
        "strMeasure4": "",
        "strMeasure5": null
    }]
}
"#;

fn client_for(server: &mockito::ServerGuard) -> RecipeClient {
    RecipeClient::builder()
        .base_url(server.url())
        .in_memory()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_details_parse_numbered_ingredients() {
    let mut server = mockito::Server::new_async().await;
    let m = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "52772".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TERIYAKI)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let details = client.details("52772").await.unwrap();

    assert_eq!(details.recipe.name, "Teriyaki Chicken Casserole");
    assert_eq!(details.recipe.category.as_deref(), Some("Chicken"));
    assert_eq!(details.recipe.area.as_deref(), Some("Japanese"));
    assert!(details.instructions.starts_with("Preheat oven"));
    assert_eq!(
        details.youtube.as_deref(),
        Some("https://www.youtube.com/watch?v=4aZr5hZXP_s")
    );
    assert!(details.source.is_none());
    assert_eq!(
        details.ingredients,
        vec![
            IngredientLine { name: "soy sauce".into(), measure: "3/4 cup".into() },
            IngredientLine { name: "water".into(), measure: "1/2 cup".into() },
            IngredientLine { name: "brown sugar".into(), measure: "1/4 cup".into() },
        ]
    );

    // second lookup is a cache hit
    client.details("52772").await.unwrap();
    m.assert_async().await;
}

#[tokio::test]
async fn test_details_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"meals": null}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.details("999999").await;

    let err = result.unwrap_err();
    assert!(matches!(&err, RecipeError::NotFound(id) if id == "999999"));

    let notice = Notice::details_failed(&err);
    assert_eq!(notice.title, "Error loading recipe");
    assert_eq!(notice.description, "Recipe not found: 999999");
}

#[tokio::test]
async fn test_add_recipe_to_shopping_list() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "52772".into()))
        .with_status(200)
        .with_body(TERIYAKI)
        .create_async()
        .await;

    let client = client_for(&server);
    client.shopping_list().add_item("Water", "1 l").unwrap();

    let added = client.add_recipe_to_shopping_list("52772").await.unwrap();
    assert_eq!(added, 2);

    let items = client.shopping_list().list();
    let names: Vec<&str> = items.iter().map(|i| i.ingredient.as_str()).collect();
    assert_eq!(names, vec!["Water", "soy sauce", "brown sugar"]);
    assert_eq!(items[0].measure, "1 l");

    // everything is already there now
    assert_eq!(client.add_recipe_to_shopping_list("52772").await.unwrap(), 0);
}
