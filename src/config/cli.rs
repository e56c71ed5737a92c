use crate::config::toml_config::TomlConfig;
use crate::config::{Overrides, ServerConfig};
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_field, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "tool-directory")]
#[command(about = "Serves a read-only AI tool directory from a CSV file")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// CSV file holding the tool records
    #[arg(long)]
    pub data_path: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(short, long)]
    pub port: Option<u16>,

    /// Route prefix for the API, e.g. "/api"; pass "" to serve at the root
    #[arg(long)]
    pub api_prefix: Option<String>,

    /// Base URL used in sitemap entries instead of the request's Host header
    #[arg(long)]
    pub public_base_url: Option<String>,

    /// Cache-Control max-age in seconds for listing responses (0 disables)
    #[arg(long)]
    pub cache_max_age: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            data_path: self.data_path.clone(),
            api_prefix: self.api_prefix.clone(),
            public_base_url: self.public_base_url.clone(),
            cache_max_age: self.cache_max_age,
        }
    }

    /// Reads the TOML file (if any), validates it, and merges everything into
    /// a [`ServerConfig`].
    pub fn resolve(&self) -> Result<ServerConfig> {
        let file = match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Some(file)
            }
            None => None,
        };

        let config = ServerConfig::resolve(self.overrides(), file.as_ref(), |key| {
            std::env::var(key).ok()
        });
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for the offline sitemap exporter.
#[derive(Debug, Clone, Parser)]
#[command(name = "sitemap-export")]
#[command(about = "Builds sitemap.xml from a running directory API")]
pub struct ExportConfig {
    /// API base, including its prefix
    #[arg(long, env = "SERVER_API_URL", default_value = "http://localhost:3000/api")]
    pub api_url: String,

    /// Public site domain written into every <loc>
    #[arg(long)]
    pub domain: Option<String>,

    #[arg(short, long, default_value = "public/sitemap.xml")]
    pub output: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for ExportConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_url("api_url", &self.api_url)?;
        let domain = validate_required_field("domain", &self.domain)?;
        crate::utils::validation::validate_url("domain", domain)?;
        crate::utils::validation::validate_path("output", &self.output)?;
        Ok(())
    }
}
