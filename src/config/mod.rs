#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_PATH: &str = "data/tools.csv";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_CACHE_MAX_AGE: u64 = 3600;

/// Fully resolved server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_path: String,
    pub api_prefix: String,
    pub public_base_url: Option<String>,
    pub cache_max_age: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_path: DEFAULT_DATA_PATH.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            public_base_url: None,
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
        }
    }
}

/// Values supplied on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub data_path: Option<String>,
    pub api_prefix: Option<String>,
    pub public_base_url: Option<String>,
    pub cache_max_age: Option<u64>,
}

impl ServerConfig {
    /// Layers settings: command line, then TOML file, then environment
    /// (`PORT`, `DATA_PATH`), then defaults.
    pub fn resolve<F>(overrides: Overrides, file: Option<&TomlConfig>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let file = file.cloned().unwrap_or_default();

        let port = overrides
            .port
            .or(file.port())
            .or_else(|| env("PORT").and_then(|p| p.trim().parse().ok()))
            .unwrap_or(defaults.port);

        let data_path = overrides
            .data_path
            .or_else(|| file.data_path().map(str::to_string))
            .or_else(|| env("DATA_PATH"))
            .unwrap_or(defaults.data_path);

        Self {
            host: overrides
                .host
                .or_else(|| file.host().map(str::to_string))
                .unwrap_or(defaults.host),
            port,
            data_path,
            api_prefix: overrides
                .api_prefix
                .or_else(|| file.api_prefix().map(str::to_string))
                .unwrap_or(defaults.api_prefix),
            public_base_url: overrides
                .public_base_url
                .or_else(|| file.public_base_url().map(str::to_string)),
            cache_max_age: overrides
                .cache_max_age
                .or(file.cache_max_age())
                .unwrap_or(defaults.cache_max_age),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_path", &self.data_path)?;
        validation::validate_positive_number("port", self.port as usize, 1)?;
        validation::validate_route_prefix("api_prefix", &self.api_prefix)?;
        if let Some(url) = &self.public_base_url {
            validation::validate_url("public_base_url", url)?;
        }
        Ok(())
    }
}

impl ConfigProvider for ServerConfig {
    fn data_path(&self) -> &str {
        &self.data_path
    }

    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    fn public_base_url(&self) -> Option<&str> {
        self.public_base_url.as_deref()
    }

    fn cache_max_age(&self) -> u64 {
        self.cache_max_age
    }
}
