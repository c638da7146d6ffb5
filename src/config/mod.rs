use crate::error::Result;
use serde::Deserialize;

/// Runtime settings, read from the environment (and `.env` via dotenv).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Postgres connection string. When absent the in-memory store is used.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// JSON file of perfume records loaded into the in-memory store.
    pub seed_file: Option<String>,
    /// Chat messages are truncated to this many characters before extraction.
    pub max_message_chars: usize,
    /// Answer platform-support questions before running the recommender.
    pub support_intercept: bool,
    pub json_limit_bytes: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("database_max_connections", 5)?
            .set_default("max_message_chars", 1000)?
            .set_default("support_intercept", true)?
            .set_default("json_limit_bytes", 16 * 1024)?
            .add_source(config::Environment::default().try_parsing(true))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_message_chars == 0 {
            return Err(crate::error::ApiError::ConfigError(
                "MAX_MESSAGE_CHARS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: None,
            database_max_connections: 5,
            seed_file: None,
            max_message_chars: 1000,
            support_intercept: true,
            json_limit_bytes: 16 * 1024,
        }
    }
}
