use crate::core::catalog::Catalog;
use crate::domain::model::{normalize_category, CategoryCount, Pagination, ToolPage, ToolRecord};
use std::collections::HashMap;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 9;

/// Listing parameters after defaulting. `page` and `limit` are always ≥ 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: usize,
    pub limit: usize,
    pub category: Option<String>,
    pub single_batch: bool,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            category: None,
            single_batch: false,
        }
    }
}

impl ListParams {
    /// Builds parameters from raw query-string values. Anything missing,
    /// non-numeric or below 1 falls back to the defaults.
    pub fn from_raw(
        page: Option<&str>,
        limit: Option<&str>,
        category: Option<&str>,
        single: Option<&str>,
    ) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
            category: category
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            single_batch: single.map(parse_flag).unwrap_or(false),
        }
    }
}

/// Reads the leading run of ASCII digits, so `"3"` and `"3abc"` both give 3.
fn parse_positive(raw: Option<&str>) -> Option<usize> {
    let raw = raw?.trim();
    let digits_end = raw
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    raw[..digits_end].parse::<usize>().ok().filter(|v| *v >= 1)
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// Records that may appear in listings and aggregates.
fn listable(catalog: &Catalog) -> impl Iterator<Item = &ToolRecord> {
    catalog.all().iter().filter(|tool| tool.has_description())
}

pub fn list_tools(catalog: &Catalog, params: &ListParams) -> ToolPage {
    let page = params.page.max(1);
    let limit = params.limit.max(1);
    let normalized = params.category.as_deref().map(normalize_category);

    let filtered: Vec<&ToolRecord> = listable(catalog)
        .filter(|tool| match &normalized {
            Some(category) => tool.in_category(category),
            None => true,
        })
        .collect();

    let total = filtered.len();

    let tools: Vec<ToolRecord> = if params.single_batch {
        filtered.into_iter().cloned().collect()
    } else {
        let start = (page - 1).saturating_mul(limit);
        filtered
            .into_iter()
            .skip(start)
            .take(limit)
            .cloned()
            .collect()
    };

    tracing::debug!(
        page,
        limit,
        category = ?params.category,
        single_batch = params.single_batch,
        total,
        returned = tools.len(),
        "Listed tools"
    );

    ToolPage {
        tools,
        pagination: Pagination {
            total,
            total_pages: total_pages(total, limit),
            current_page: page,
            per_page: limit,
        },
    }
}

/// Counts listable records per category token, most populated first.
/// Names keep their stored spelling: `Writing` and `writing` stay separate.
pub fn list_categories(catalog: &Catalog) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tool in listable(catalog) {
        for token in tool.category_tokens() {
            match index.get(token) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(token, counts.len());
                    counts.push(CategoryCount {
                        name: token.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }

    // stable: ties keep first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(title: &str, description: &str, category: &str) -> ToolRecord {
        ToolRecord {
            title: title.to_string(),
            description: description.to_string(),
            category: Some(category.to_string()).filter(|c| !c.is_empty()),
            ..Default::default()
        }
    }

    fn scenario() -> Catalog {
        Catalog::new(vec![
            tool("Alpha", "x", "NLP, Writing"),
            tool("Beta", "", "NLP"),
            tool("Gamma", "y", "writing"),
        ])
    }

    fn numbered(count: usize) -> Catalog {
        Catalog::new(
            (1..=count)
                .map(|i| tool(&format!("Tool {}", i), "desc", "General"))
                .collect(),
        )
    }

    fn titles(page: &ToolPage) -> Vec<&str> {
        page.tools.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_category_filter_excludes_empty_descriptions() {
        let params = ListParams {
            category: Some("writing".to_string()),
            ..Default::default()
        };
        let page = list_tools(&scenario(), &params);
        assert_eq!(titles(&page), vec!["Alpha", "Gamma"]);
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn test_no_filter_still_drops_blank_descriptions() {
        let catalog = Catalog::new(vec![
            tool("Alpha", "x", "NLP"),
            tool("Blank", "   ", "NLP"),
        ]);
        let page = list_tools(&catalog, &ListParams::default());
        assert_eq!(titles(&page), vec!["Alpha"]);
    }

    #[test]
    fn test_category_filter_is_case_and_hyphen_insensitive() {
        let catalog = Catalog::new(vec![
            tool("Alpha", "x", "Machine Learning"),
            tool("Beta", "x", "Vision"),
        ]);
        let params = ListParams {
            category: Some("machine-learning".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&list_tools(&catalog, &params)), vec!["Alpha"]);
    }

    #[test]
    fn test_multi_category_record_matches_each_token() {
        let catalog = Catalog::new(vec![tool("Alpha", "x", "Writing, Productivity")]);
        for category in ["writing", "productivity", "PRODUCTIVITY"] {
            let params = ListParams {
                category: Some(category.to_string()),
                ..Default::default()
            };
            assert_eq!(list_tools(&catalog, &params).pagination.total, 1, "{}", category);
        }
    }

    #[test]
    fn test_unknown_category_is_empty_not_error() {
        let params = ListParams {
            category: Some("nothing-here".to_string()),
            ..Default::default()
        };
        let page = list_tools(&scenario(), &params);
        assert!(page.tools.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[test]
    fn test_pages_are_contiguous_slices() {
        let catalog = numbered(20);
        let all: Vec<String> = catalog.all().iter().map(|t| t.title.clone()).collect();

        for limit in 1..=7 {
            for page in 1..=5 {
                let params = ListParams {
                    page,
                    limit,
                    ..Default::default()
                };
                let result = list_tools(&catalog, &params);
                assert!(result.tools.len() <= limit);

                let start = ((page - 1) * limit).min(all.len());
                let end = (start + limit).min(all.len());
                let expected: Vec<&str> = all[start..end].iter().map(String::as_str).collect();
                assert_eq!(titles(&result), expected);
                assert_eq!(result.pagination.total_pages, total_pages(20, limit));
            }
        }
    }

    #[test]
    fn test_page_past_end_is_empty_and_echoes_request() {
        let params = ListParams {
            page: 10,
            limit: 9,
            ..Default::default()
        };
        let page = list_tools(&numbered(12), &params);
        assert!(page.tools.is_empty());
        assert_eq!(page.pagination.total, 12);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.pagination.current_page, 10);
        assert_eq!(page.pagination.per_page, 9);
    }

    #[test]
    fn test_single_batch_returns_everything() {
        let params = ListParams {
            page: 2,
            limit: 3,
            single_batch: true,
            ..Default::default()
        };
        let page = list_tools(&numbered(10), &params);
        assert_eq!(page.tools.len(), 10);
        assert_eq!(page.pagination.total, 10);
        assert_eq!(page.pagination.total_pages, 4);
        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(page.pagination.per_page, 3);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 9), 0);
        assert_eq!(total_pages(1, 9), 1);
        assert_eq!(total_pages(9, 9), 1);
        assert_eq!(total_pages(10, 9), 2);
        assert_eq!(total_pages(18, 9), 2);
        assert_eq!(total_pages(7, 1), 7);
    }

    #[test]
    fn test_params_from_raw_defaults() {
        let params = ListParams::from_raw(None, None, None, None);
        assert_eq!(params, ListParams::default());

        let params = ListParams::from_raw(Some("abc"), Some(""), Some("  "), Some("no"));
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 9);
        assert_eq!(params.category, None);
        assert!(!params.single_batch);

        let params = ListParams::from_raw(Some("0"), Some("-4"), None, None);
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 9);
    }

    #[test]
    fn test_params_from_raw_parses_values() {
        let params = ListParams::from_raw(Some("3"), Some("12abc"), Some(" NLP "), Some("TRUE"));
        assert_eq!(params.page, 3);
        assert_eq!(params.limit, 12);
        assert_eq!(params.category.as_deref(), Some("NLP"));
        assert!(params.single_batch);
        assert!(ListParams::from_raw(None, None, None, Some("1")).single_batch);
    }

    #[test]
    fn test_list_categories_keeps_case_variants_apart() {
        let categories = list_categories(&scenario());
        assert_eq!(
            categories,
            vec![
                CategoryCount { name: "NLP".to_string(), count: 1 },
                CategoryCount { name: "Writing".to_string(), count: 1 },
                CategoryCount { name: "writing".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_list_categories_counts_each_token_and_sorts() {
        let catalog = Catalog::new(vec![
            tool("A", "x", "Writing, Productivity"),
            tool("B", "x", "Productivity"),
            tool("C", "x", "Vision,, "),
            tool("D", "", "Productivity"),
            tool("E", "x", ""),
        ]);
        let categories = list_categories(&catalog);
        assert_eq!(
            categories,
            vec![
                CategoryCount { name: "Productivity".to_string(), count: 2 },
                CategoryCount { name: "Writing".to_string(), count: 1 },
                CategoryCount { name: "Vision".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        let page = list_tools(&catalog, &ListParams::default());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 0);
        assert!(list_categories(&catalog).is_empty());
    }
}
