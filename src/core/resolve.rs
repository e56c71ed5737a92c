use crate::core::catalog::Catalog;
use crate::domain::model::ToolRecord;

pub const DEFAULT_RELATED_LIMIT: usize = 5;

/// A slug matcher receives a record and an already-normalised fragment.
pub type SlugMatcher = fn(&ToolRecord, &str) -> bool;

/// Matchers tried by [`find_by_slug`]. A record matches if any of them holds;
/// the first matching record in store order wins.
pub const SLUG_MATCHERS: &[(&str, SlugMatcher)] = &[
    ("url", matches_url),
    ("page", matches_page),
    ("title", matches_title_slug),
];

pub fn matches_url(tool: &ToolRecord, fragment: &str) -> bool {
    field_equals(tool.url.as_deref(), fragment)
}

pub fn matches_page(tool: &ToolRecord, fragment: &str) -> bool {
    field_equals(tool.page.as_deref(), fragment)
}

pub fn matches_title_slug(tool: &ToolRecord, fragment: &str) -> bool {
    slugify(&tool.title) == fragment
}

fn field_equals(field: Option<&str>, fragment: &str) -> bool {
    field.is_some_and(|value| value.trim().to_lowercase() == fragment)
}

/// `"Chat GPT (Plus)!"` becomes `"chat-gpt-plus"`: lower-case, each run of
/// non-alphanumerics collapsed to one `-`, no leading or trailing `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Percent-decodes, lower-cases and trims a path fragment. Invalid
/// percent-encoding is matched literally.
pub fn normalize_fragment(raw: &str) -> String {
    let decoded = urlencoding::decode(raw)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    decoded.trim().to_lowercase()
}

pub fn find_by_identifier<'a>(catalog: &'a Catalog, id: &str) -> Option<&'a ToolRecord> {
    catalog.all().iter().find(|tool| tool.id.as_deref() == Some(id))
}

/// Resolves a raw, still percent-encoded path fragment.
pub fn find_by_slug<'a>(catalog: &'a Catalog, raw: &str) -> Option<&'a ToolRecord> {
    find_by_decoded_slug(catalog, &normalize_fragment(raw))
}

/// Resolves a fragment the router has already percent-decoded. A literal
/// `%XX` left in it is matched as-is.
pub fn find_by_decoded_slug<'a>(catalog: &'a Catalog, fragment: &str) -> Option<&'a ToolRecord> {
    let fragment = fragment.trim().to_lowercase();
    if fragment.is_empty() {
        return None;
    }

    catalog.all().iter().find(|tool| {
        SLUG_MATCHERS.iter().any(|(name, matcher)| {
            let hit = matcher(tool, &fragment);
            if hit {
                tracing::debug!("Slug '{}' matched '{}' by {}", fragment, tool.title, name);
            }
            hit
        })
    })
}

/// Tools sharing at least one category with `tool`, in store order.
pub fn related_tools<'a>(
    catalog: &'a Catalog,
    tool: &ToolRecord,
    limit: usize,
    require_description: bool,
) -> Vec<&'a ToolRecord> {
    catalog
        .all()
        .iter()
        .filter(|candidate| candidate.title != tool.title)
        .filter(|candidate| !require_description || candidate.has_description())
        .filter(|candidate| candidate.shares_category_with(tool))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, category: &str) -> ToolRecord {
        ToolRecord {
            title: title.to_string(),
            description: "desc".to_string(),
            category: Some(category.to_string()),
            ..Default::default()
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            ToolRecord {
                id: Some("1".to_string()),
                url: Some("https://Alpha.ai".to_string()),
                ..record("Alpha Writer", "NLP, Writing")
            },
            ToolRecord {
                id: Some("2".to_string()),
                page: Some("Beta-Page".to_string()),
                description: String::new(),
                ..record("Beta", "nlp")
            },
            ToolRecord {
                id: Some("3".to_string()),
                ..record("Gamma: Vision++ ", "Vision")
            },
            record("Delta", "writing"),
            record("Epsilon", "Writing, Vision"),
        ])
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Alpha Writer"), "alpha-writer");
        assert_eq!(slugify("Gamma: Vision++ "), "gamma-vision");
        assert_eq!(slugify("--Chat GPT (Plus)!--"), "chat-gpt-plus");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_normalize_fragment() {
        assert_eq!(normalize_fragment("  Alpha%20Writer "), "alpha writer");
        assert_eq!(normalize_fragment("https%3A%2F%2Falpha.ai"), "https://alpha.ai");
        assert_eq!(normalize_fragment("%E0%A4%A"), "%e0%a4%a");
    }

    #[test]
    fn test_matchers_are_independent() {
        let catalog = catalog();
        let alpha = &catalog.all()[0];
        let beta = &catalog.all()[1];

        assert!(matches_url(alpha, "https://alpha.ai"));
        assert!(!matches_page(alpha, "https://alpha.ai"));
        assert!(matches_page(beta, "beta-page"));
        assert!(!matches_url(beta, "beta-page"));
        assert!(matches_title_slug(alpha, "alpha-writer"));
        assert!(!matches_title_slug(alpha, "alpha writer"));
    }

    #[test]
    fn test_find_by_identifier() {
        let catalog = catalog();
        assert_eq!(find_by_identifier(&catalog, "2").unwrap().title, "Beta");
        assert!(find_by_identifier(&catalog, "99").is_none());
        assert!(find_by_identifier(&catalog, "").is_none());
    }

    #[test]
    fn test_find_by_slug_each_strategy() {
        let catalog = catalog();
        assert_eq!(
            find_by_slug(&catalog, "https%3A%2F%2Falpha.ai").unwrap().title,
            "Alpha Writer"
        );
        assert_eq!(find_by_slug(&catalog, "BETA-PAGE").unwrap().title, "Beta");
        assert_eq!(find_by_slug(&catalog, "gamma-vision").unwrap().title, "Gamma: Vision++ ");
        assert!(find_by_slug(&catalog, "unknown").is_none());
        assert!(find_by_slug(&catalog, "  ").is_none());
    }

    #[test]
    fn test_find_by_decoded_slug_keeps_literal_percent() {
        let catalog = Catalog::new(vec![
            ToolRecord {
                url: Some("https://x.com/a%20b".to_string()),
                ..record("Spaced", "A")
            },
            ToolRecord {
                url: Some("https://x.com/?q=100%25".to_string()),
                ..record("Percent", "A")
            },
        ]);
        assert_eq!(
            find_by_decoded_slug(&catalog, "https://x.com/a%20b").unwrap().title,
            "Spaced"
        );
        assert_eq!(
            find_by_decoded_slug(&catalog, " HTTPS://x.com/?q=100%25").unwrap().title,
            "Percent"
        );
        assert!(find_by_decoded_slug(&catalog, "https://x.com/a b").is_none());
        assert_eq!(
            find_by_slug(&catalog, "https%3A%2F%2Fx.com%2Fa%2520b").unwrap().title,
            "Spaced"
        );
    }

    #[test]
    fn test_title_slug_round_trips() {
        let catalog = catalog();
        for tool in catalog.all() {
            if tool.url.is_some() || tool.page.is_some() {
                continue;
            }
            let found = find_by_slug(&catalog, &slugify(&tool.title)).unwrap();
            assert_eq!(found.title, tool.title);
        }
    }

    #[test]
    fn test_find_by_slug_first_match_in_store_order_wins() {
        let catalog = Catalog::new(vec![
            ToolRecord {
                page: Some("shared".to_string()),
                ..record("First", "A")
            },
            record("Shared", "B"),
        ]);
        assert_eq!(find_by_slug(&catalog, "shared").unwrap().title, "First");
    }

    #[test]
    fn test_related_tools_shares_category_and_excludes_self() {
        let catalog = catalog();
        let alpha = &catalog.all()[0];

        let related: Vec<&str> = related_tools(&catalog, alpha, DEFAULT_RELATED_LIMIT, false)
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(related, vec!["Beta", "Delta", "Epsilon"]);

        let related: Vec<&str> = related_tools(&catalog, alpha, DEFAULT_RELATED_LIMIT, true)
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(related, vec!["Delta", "Epsilon"]);
    }

    #[test]
    fn test_related_tools_respects_limit() {
        let catalog = Catalog::new(
            (0..10)
                .map(|i| record(&format!("Tool {}", i), "Same"))
                .collect(),
        );
        let tool = &catalog.all()[0];
        for limit in 0..12 {
            let related = related_tools(&catalog, tool, limit, true);
            assert!(related.len() <= limit);
            assert!(related.iter().all(|t| t.title != tool.title));
        }
        assert_eq!(related_tools(&catalog, tool, 5, true).len(), 5);
    }

    #[test]
    fn test_related_tools_without_category_is_empty() {
        let catalog = catalog();
        let loner = ToolRecord {
            title: "Loner".to_string(),
            ..Default::default()
        };
        assert!(related_tools(&catalog, &loner, 5, false).is_empty());
    }
}
