use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// Items per materialized page.
    pub page_size: usize,
    /// Hard cap on caller-supplied page sizes.
    pub max_page_size: usize,
    /// Default number of related announcements returned.
    pub related_limit: i64,
    /// Visual-feedback delay applied by interactive scroll windows.
    pub load_more_delay_ms: u64,
    /// Interval for the background feed stats poller.
    pub stats_poll_interval_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_page_size: 100,
            related_limit: 5,
            load_more_delay_ms: 500,
            stats_poll_interval_secs: 30,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.base_url", "http://localhost:8080")?
            .set_default("database.max_connections", 10)?
            .set_default("database.url", "sqlite://herald.db")?
            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (with HERALD__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("HERALD").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                base_url: "http://localhost:8080".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite://herald.db".to_string(),
                max_connections: 10,
            },
            feed: FeedConfig::default(),
        }
    }
}
