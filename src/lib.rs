pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, ExportConfig};

pub use adapters::{InMemorySource, LocalSource};
pub use app::SitemapExporter;
pub use config::ServerConfig;
pub use crate::core::{catalog::Catalog, query::ListParams};
pub use utils::error::{DirectoryError, Result};
