use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_OPENCAGE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_BODY_LIMIT: usize = 20 * 1024 * 1024;

/// Reverse geocoding settings. A missing key puts the resolver in offline mode.
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl GeocodingConfig {
    #[cfg(test)]
    pub fn offline() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENCAGE_URL.to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub geocoding: GeocodingConfig,
    pub openai_base_url: String,
    pub body_limit: usize,
}

impl Config {
    /// Read configuration from the process environment. Call after `dotenv()`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", raw))?,
            None => DEFAULT_PORT,
        };

        let environment = get("APP_ENV")
            .or_else(|| get("NODE_ENV"))
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let geocoding = GeocodingConfig {
            api_key: get("OPENCAGE_API_KEY"),
            base_url: get("OPENCAGE_BASE_URL").unwrap_or_else(|| DEFAULT_OPENCAGE_URL.to_string()),
        };

        let openai_base_url = get("OPENAI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string());

        let body_limit = match get("BODY_LIMIT_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("BODY_LIMIT_BYTES must be a byte count, got '{}'", raw))?,
            None => DEFAULT_BODY_LIMIT,
        };

        Ok(Self {
            port,
            environment,
            geocoding,
            openai_base_url,
            body_limit,
        })
    }
}
