use thiserror::Error;

/// Errors that can occur while searching recipes or managing saved data
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Network or transport failure talking to the recipe API
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The recipe API answered with a non-success status
    #[error("HTTP error! status: {status} ({url})")]
    StatusError { status: u16, url: String },

    /// Response body was not the JSON we expected
    #[error("Failed to decode response: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// Lookup by id returned no record
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// No usable ingredient terms after normalization
    #[error("No ingredients given to search for")]
    EmptyQuery,

    /// Shopping list already holds an item with this name
    #[error("{0} is already in your shopping list")]
    AlreadyInList(String),

    /// Reading or writing persisted data failed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl From<std::io::Error> for RecipeError {
    fn from(e: std::io::Error) -> Self {
        RecipeError::StorageError(e.to_string())
    }
}
