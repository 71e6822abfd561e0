use std::env;
use thiserror::Error;

/// Process-wide configuration, read once at startup and passed by reference
/// into every component. No component reads the environment after this.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub weather_api_key: String,
    pub usda_api_key: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub port: u16,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingKey(&'static str),
}

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_PORT: u16 = 5000;

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            weather_api_key: require("WEATHER_API_KEY")?,
            usda_api_key: require("USDA_API_KEY")?,
            // Optional: /consult and /chat degrade to explicit errors without it
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingKey(key))
}
