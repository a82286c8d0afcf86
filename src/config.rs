use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main client configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClientConfig {
    /// Upstream recipe API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Response cache settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Where favorites and the shopping list are persisted
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Configuration for the upstream recipe API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Configuration for the response cache
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// How long a cached response stays fresh, in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Configuration for local persistence
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON file per stored key
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("cookblink/{}", env!("CARGO_PKG_VERSION"))
}

fn default_ttl_secs() -> u64 {
    5 * 60
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".cookblink")
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl ClientConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with COOKBLINK__ prefix
    /// 2. cookblink.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: COOKBLINK__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// Environment variable format: COOKBLINK__CACHE__TTL_SECS
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("cookblink").required(false))
        // Use double underscore for nested: COOKBLINK__STORAGE__DATA_DIR
        .add_source(
            Environment::with_prefix("COOKBLINK")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_values() {
        assert_eq!(default_base_url(), "https://www.themealdb.com/api/json/v1/1");
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_ttl_secs(), 300);
        assert!(default_user_agent().starts_with("cookblink/"));
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.cache.ttl(), Duration::from_secs(300));
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.storage.data_dir, PathBuf::from(".cookblink"));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let settings = Config::builder()
            .add_source(File::from_str(
                "[cache]\nttl_secs = 60\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: ClientConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.api.base_url, default_base_url());
        assert_eq!(config.storage.data_dir, default_data_dir());
    }

    #[test]
    fn test_env_override() {
        env::set_var("COOKBLINK__CACHE__TTL_SECS", "42");
        let result = load_config();
        env::remove_var("COOKBLINK__CACHE__TTL_SECS");

        let config = result.unwrap();
        assert_eq!(config.cache.ttl_secs, 42);
    }
}
