use crate::utils::error::Result;

/// Where the catalog's delimited text comes from.
pub trait CatalogSource: Send + Sync {
    /// Human-readable location, used in log lines.
    fn describe(&self) -> String;

    fn read(&self) -> Result<Vec<u8>>;
}

pub trait ConfigProvider: Send + Sync {
    fn data_path(&self) -> &str;
    fn bind_addr(&self) -> String;
    fn api_prefix(&self) -> &str;
    fn public_base_url(&self) -> Option<&str>;
    fn cache_max_age(&self) -> u64;
}
