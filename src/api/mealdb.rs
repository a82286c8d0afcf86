use crate::api::{Endpoint, Transport};
use crate::config::ApiConfig;
use crate::RecipeError;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// HTTP transport for TheMealDB's public JSON API
pub struct MealDbTransport {
    client: Client,
    base_url: String,
}

impl MealDbTransport {
    /// Create a transport from configuration
    pub fn new(config: &ApiConfig) -> Result<Self, RecipeError> {
        Self::build(&config.base_url, config.timeout(), &config.user_agent)
    }

    /// Point the transport at another server, optionally with a custom timeout
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, RecipeError> {
        let defaults = ApiConfig::default();
        let timeout = timeout.unwrap_or_else(|| defaults.timeout());
        Self::build(&base_url.into(), timeout, &defaults.user_agent)
    }

    fn build(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, RecipeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(MealDbTransport {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for MealDbTransport {
    fn transport_name(&self) -> &str {
        "themealdb"
    }

    async fn get_json(&self, endpoint: Endpoint, param: &str) -> Result<Value, RecipeError> {
        let url = format!("{}/{}", self.base_url, endpoint.path());
        debug!("GET {}?{}={}", url, endpoint.query_param(), param);

        let response = self
            .client
            .get(&url)
            .query(&[(endpoint.query_param(), param)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} answered {} for {}={}", url, status, endpoint.query_param(), param);
            return Err(RecipeError::StatusError {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
