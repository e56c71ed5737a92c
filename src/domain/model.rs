use serde::{Deserialize, Deserializer, Serialize};

/// One directory entry. Field names on the wire match the CSV header row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolRecord {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(
        rename = "imageUrl",
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,

    #[serde(
        rename = "filter1",
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    #[serde(
        rename = "Tags",
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<String>,

    #[serde(default, deserialize_with = "lenient_rank", skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,

    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ToolRecord {
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// Raw category tokens: comma-split, trimmed, empty tokens dropped.
    pub fn category_tokens(&self) -> impl Iterator<Item = &str> {
        split_list(self.category.as_deref())
    }

    /// True when any of this record's categories matches `normalized`, which
    /// must already be in [`normalize_category`] form.
    pub fn in_category(&self, normalized: &str) -> bool {
        self.category_tokens()
            .any(|token| normalize_category(token) == normalized)
    }

    pub fn shares_category_with(&self, other: &ToolRecord) -> bool {
        let wanted: Vec<String> = other.category_tokens().map(normalize_category).collect();
        self.category_tokens()
            .any(|token| wanted.contains(&normalize_category(token)))
    }
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Folds URL-slug and stored category forms together: `machine-learning`
/// and `Machine Learning` both become `machine learning`.
pub fn normalize_category(raw: &str) -> String {
    raw.trim().to_lowercase().replace('-', " ")
}

/// Slug used by category pages: lower-case with whitespace runs joined by `-`.
pub fn category_slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

fn lenient_rank<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    #[allow(dead_code)]
    enum RawRank {
        Number(u32),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<RawRank>::deserialize(deserializer)? {
        Some(RawRank::Number(n)) => Some(n),
        Some(RawRank::Float(f)) if f.is_finite() && f >= 0.0 && f <= u32::MAX as f64 => {
            Some(f.round() as u32)
        }
        Some(RawRank::Text(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolPage {
    pub tools: Vec<ToolRecord>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<CategoryCount>,
}
