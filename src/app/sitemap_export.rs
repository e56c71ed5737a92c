use crate::core::sitemap::{self, ChangeFreq, SitemapEntry};
use crate::domain::model::{CategoryCount, CategoryList, ToolPage, ToolRecord};
use crate::utils::error::{DirectoryError, Result};
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Builds the public site's sitemap from a running directory API.
pub struct SitemapExporter {
    client: Client,
    api_url: String,
    domain: String,
}

impl SitemapExporter {
    pub fn new(api_url: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            domain: domain.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.api_url, path);
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::UpstreamStatusError {
                url,
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }

    pub async fn fetch_tools(&self) -> Result<Vec<ToolRecord>> {
        let page: ToolPage = self.get_json("/tools?single=true").await?;
        Ok(page.tools)
    }

    pub async fn fetch_categories(&self) -> Result<Vec<CategoryCount>> {
        let list: CategoryList = self.get_json("/categories").await?;
        Ok(list.categories)
    }

    /// Static routes first, then category pages, then tool pages.
    pub fn entries(
        &self,
        tools: &[ToolRecord],
        categories: &[CategoryCount],
        today: NaiveDate,
    ) -> Vec<SitemapEntry> {
        let lastmod = today.format("%Y-%m-%d").to_string();
        let page = |path: String, changefreq: ChangeFreq, priority: f32| {
            SitemapEntry::new(format!("{}{}", self.domain, path), changefreq, priority)
                .with_lastmod(lastmod.clone())
        };

        let mut entries = vec![
            page(String::new(), ChangeFreq::Daily, 1.0),
            page("/categories".to_string(), ChangeFreq::Weekly, 0.8),
            page("/privacy".to_string(), ChangeFreq::Monthly, 0.3),
            page("/terms".to_string(), ChangeFreq::Monthly, 0.3),
        ];

        entries.extend(categories.iter().map(|category| {
            let slug = category.name.to_lowercase().replace(' ', "-");
            page(
                format!("/category/{}", urlencoding::encode(&slug)),
                ChangeFreq::Daily,
                0.8,
            )
        }));

        entries.extend(tools.iter().map(|tool| {
            let path = match &tool.url {
                Some(url) => url.clone(),
                None => tool.title.to_lowercase().replace(' ', "-"),
            };
            page(
                format!("/tool/{}", urlencoding::encode(&path)),
                ChangeFreq::Weekly,
                0.7,
            )
        }));

        entries
    }

    /// Fetches, renders and writes the sitemap; returns the number of URLs.
    pub async fn export(&self, output: &Path) -> Result<usize> {
        let (tools, categories) = tokio::try_join!(self.fetch_tools(), self.fetch_categories())?;
        tracing::info!(
            "Fetched {} tools and {} categories from {}",
            tools.len(),
            categories.len(),
            self.api_url
        );

        let entries = self.entries(&tools, &categories, Utc::now().date_naive());
        let xml = sitemap::render(&entries);

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output, xml)?;

        tracing::info!("Wrote {} URLs to {}", entries.len(), output.display());
        Ok(entries.len())
    }
}
