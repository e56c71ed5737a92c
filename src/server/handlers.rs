use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::core::{query, resolve, sitemap};
use crate::domain::model::{CategoryList, ToolRecord};
use crate::server::error::ApiError;
use crate::server::AppState;
use crate::utils::error::DirectoryError;

#[derive(Debug, Default, Deserialize)]
pub struct ToolsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub single: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SlugQuery {
    pub related: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub tools_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResolvedTool {
    pub tool: ToolRecord,
    pub related: Vec<ToolRecord>,
}

/// Attaches a `Cache-Control` revalidation hint when caching is enabled.
fn with_cache_hint(max_age: u64, body: impl IntoResponse) -> Response {
    let mut response = body.into_response();
    if max_age > 0 {
        if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={}", max_age)) {
            response.headers_mut().insert(header::CACHE_CONTROL, value);
        }
    }
    response
}

pub(crate) async fn list_tools(
    State(state): State<Arc<AppState>>,
    params: Option<Query<ToolsQuery>>,
) -> Response {
    // A query string that does not deserialise is treated as absent.
    let Query(raw) = params.unwrap_or_default();
    let params = query::ListParams::from_raw(
        raw.page.as_deref(),
        raw.limit.as_deref(),
        raw.category.as_deref(),
        raw.single.as_deref(),
    );

    let page = query::list_tools(&state.catalog, &params);
    with_cache_hint(state.cache_max_age, Json(page))
}

pub(crate) async fn tool_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ToolRecord>, ApiError> {
    let tool = resolve::find_by_identifier(&state.catalog, &id).ok_or(DirectoryError::NotFound)?;
    Ok(Json(tool.clone()))
}

pub(crate) async fn tool_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    params: Option<Query<SlugQuery>>,
) -> Result<Json<ResolvedTool>, ApiError> {
    let Query(raw) = params.unwrap_or_default();
    let limit = raw
        .related
        .as_deref()
        .and_then(|r| r.trim().parse::<usize>().ok())
        .unwrap_or(resolve::DEFAULT_RELATED_LIMIT);

    // `Path` has already percent-decoded the segment.
    let tool =
        resolve::find_by_decoded_slug(&state.catalog, &slug).ok_or(DirectoryError::NotFound)?;
    let related = resolve::related_tools(&state.catalog, tool, limit, true)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ResolvedTool {
        tool: tool.clone(),
        related,
    }))
}

pub(crate) async fn list_categories(State(state): State<Arc<AppState>>) -> Response {
    let categories = query::list_categories(&state.catalog);
    with_cache_hint(state.cache_max_age, Json(CategoryList { categories }))
}

pub(crate) async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        tools_count: state.catalog.count(),
    })
}

pub(crate) async fn sitemap_xml(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let base_url = state
        .public_base_url
        .clone()
        .unwrap_or_else(|| request_base_url(&headers, &state.fallback_host));

    let xml = sitemap::catalog_sitemap(&state.catalog, &base_url);
    with_cache_hint(
        state.cache_max_age,
        ([(header::CONTENT_TYPE, "application/xml")], xml),
    )
}

/// `{x-forwarded-proto or http}://{Host header or fallback}`.
fn request_base_url(headers: &HeaderMap, fallback_host: &str) -> String {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let proto = header_str("x-forwarded-proto").unwrap_or_else(|| "http".to_string());
    let host = header_str(header::HOST.as_str()).unwrap_or_else(|| fallback_host.to_string());
    format!("{}://{}", proto, host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_base_url_prefers_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("dir.example"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));
        assert_eq!(request_base_url(&headers, "0.0.0.0:3000"), "https://dir.example");
    }

    #[test]
    fn request_base_url_falls_back() {
        let headers = HeaderMap::new();
        assert_eq!(request_base_url(&headers, "localhost:3000"), "http://localhost:3000");
    }

    #[test]
    fn cache_hint_only_when_enabled() {
        let response = with_cache_hint(600, "body");
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=600"
        );

        let response = with_cache_hint(0, "body");
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    }
}
