pub mod catalog;
pub mod query;
pub mod resolve;
pub mod sitemap;

pub use crate::domain::model::{CategoryCount, Pagination, ToolPage, ToolRecord};
pub use crate::domain::ports::{CatalogSource, ConfigProvider};
pub use crate::utils::error::Result;
pub use catalog::Catalog;
pub use query::ListParams;
