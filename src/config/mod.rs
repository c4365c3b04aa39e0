use std::collections::HashSet;
use std::env;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use tracing::{info, warn};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub max_file_size_mb: usize,
    pub max_concurrent_requests: usize,
    pub request_timeout_seconds: u64,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
}

// API keys accepted by the auth middleware, loaded once from the environment.
pub static VALID_API_KEYS: Lazy<HashSet<String>> = Lazy::new(|| {
    env::var("VALID_API_KEYS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
});

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| {
                info!("SERVER_HOST not set, using default: 0.0.0.0");
                "0.0.0.0".to_string()
            }),
            server_port: Self::parse_env_var("SERVER_PORT", 8080)
                .context("Failed to parse SERVER_PORT")?,
            max_file_size_mb: Self::parse_env_var("MAX_FILE_SIZE_MB", 10)
                .context("Failed to parse MAX_FILE_SIZE_MB")?,
            max_concurrent_requests: Self::parse_env_var("MAX_CONCURRENT_REQUESTS", 100)
                .context("Failed to parse MAX_CONCURRENT_REQUESTS")?,
            request_timeout_seconds: Self::parse_env_var("REQUEST_TIMEOUT_SECONDS", 60)
                .context("Failed to parse REQUEST_TIMEOUT_SECONDS")?,
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
        };

        config.validate()?;

        if config.openai_api_key.is_empty() {
            warn!("OPENAI_API_KEY is not set. The optimize endpoint will be unavailable.");
        }

        if VALID_API_KEYS.is_empty() {
            warn!("No valid API keys configured. Set VALID_API_KEYS environment variable.");
        } else {
            info!("Loaded {} valid API keys", VALID_API_KEYS.len());
        }

        info!(
            host = %config.server_host,
            port = config.server_port,
            max_file_size_mb = config.max_file_size_mb,
            model = %config.openai_model,
            "Configuration loaded"
        );
        Ok(config)
    }

    fn parse_env_var<T>(var_name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => match val.parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!(
                        "Failed to parse {}: {} (using default: {:?})",
                        var_name, e, default
                    );
                    Ok(default)
                }
            },
            Err(_) => Ok(default),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.max_concurrent_requests == 0 {
            return Err(anyhow::anyhow!(
                "MAX_CONCURRENT_REQUESTS must be greater than 0"
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!(
                "REQUEST_TIMEOUT_SECONDS must be greater than 0"
            ));
        }
        if self.openai_base_url.is_empty() {
            return Err(anyhow::anyhow!("OPENAI_BASE_URL must not be empty"));
        }
        Ok(())
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    pub fn validate_api_key(key: &str) -> bool {
        VALID_API_KEYS.contains(key)
    }
}
