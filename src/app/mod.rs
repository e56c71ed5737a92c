// Application layer: workflows composed from the core services.

pub mod sitemap_export;

pub use sitemap_export::SitemapExporter;
