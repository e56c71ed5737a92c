use crate::core::catalog::Catalog;
use crate::domain::model::category_slug;
use std::collections::HashSet;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub changefreq: ChangeFreq,
    pub priority: f32,
    pub lastmod: Option<String>,
}

impl SitemapEntry {
    pub fn new(loc: impl Into<String>, changefreq: ChangeFreq, priority: f32) -> Self {
        Self {
            loc: loc.into(),
            changefreq,
            priority,
            lastmod: None,
        }
    }

    pub fn with_lastmod(mut self, lastmod: impl Into<String>) -> Self {
        self.lastmod = Some(lastmod.into());
        self
    }
}

pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for entry in entries {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.loc));
        if let Some(lastmod) = &entry.lastmod {
            let _ = writeln!(xml, "    <lastmod>{}</lastmod>", escape_xml(lastmod));
        }
        let _ = writeln!(xml, "    <changefreq>{}</changefreq>", entry.changefreq.as_str());
        let _ = writeln!(xml, "    <priority>{:.1}</priority>", entry.priority);
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>");
    xml
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Every distinct category token across the whole catalog, first-seen order.
pub fn distinct_categories(catalog: &Catalog) -> Vec<&str> {
    let mut seen = HashSet::new();
    catalog
        .all()
        .iter()
        .flat_map(|tool| tool.category_tokens())
        .filter(|token| seen.insert(*token))
        .collect()
}

/// Sitemap served by the API: site root, one page per tool with a url, one
/// page per category.
pub fn catalog_entries(catalog: &Catalog, base_url: &str) -> Vec<SitemapEntry> {
    let base_url = base_url.trim_end_matches('/');
    let mut entries = vec![SitemapEntry::new(base_url, ChangeFreq::Daily, 1.0)];

    entries.extend(catalog.all().iter().filter_map(|tool| {
        tool.url.as_deref().map(|url| {
            SitemapEntry::new(
                format!("{}/tool/{}", base_url, urlencoding::encode(url)),
                ChangeFreq::Weekly,
                0.8,
            )
        })
    }));

    entries.extend(distinct_categories(catalog).into_iter().map(|category| {
        SitemapEntry::new(
            format!(
                "{}/category/{}",
                base_url,
                urlencoding::encode(&category_slug(category))
            ),
            ChangeFreq::Weekly,
            0.7,
        )
    }));

    entries
}

pub fn catalog_sitemap(catalog: &Catalog, base_url: &str) -> String {
    render(&catalog_entries(catalog, base_url))
}
