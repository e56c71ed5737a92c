use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk configuration. Every value is optional; unset values fall back to
/// environment variables and then to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub data: Option<DataSection>,
    pub http: Option<HttpSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpSection {
    pub api_prefix: Option<String>,
    pub public_base_url: Option<String>,
    pub cache_max_age: Option<u64>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DirectoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are
    /// left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DirectoryError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn host(&self) -> Option<&str> {
        self.server.as_ref()?.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.server.as_ref()?.port
    }

    pub fn data_path(&self) -> Option<&str> {
        self.data.as_ref()?.path.as_deref()
    }

    pub fn api_prefix(&self) -> Option<&str> {
        self.http.as_ref()?.api_prefix.as_deref()
    }

    pub fn public_base_url(&self) -> Option<&str> {
        self.http.as_ref()?.public_base_url.as_deref()
    }

    pub fn cache_max_age(&self) -> Option<u64> {
        self.http.as_ref()?.cache_max_age
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = self.data_path() {
            crate::utils::validation::validate_path("data.path", path)?;
        }
        if let Some(port) = self.port() {
            crate::utils::validation::validate_positive_number("server.port", port as usize, 1)?;
        }
        if let Some(prefix) = self.api_prefix() {
            crate::utils::validation::validate_route_prefix("http.api_prefix", prefix)?;
        }
        if let Some(url) = self.public_base_url() {
            crate::utils::validation::validate_url("http.public_base_url", url)?;
        }
        Ok(())
    }
}
