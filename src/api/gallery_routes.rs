//! Public pages - gallery, component detail and design tokens

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use ds_types::Brand;
use serde::Deserialize;
use tracing::debug;

use crate::auth::{brand_cookie, request_cookie, BRAND_COOKIE};
use crate::error::{DsError, Result};
use crate::models::DsComponent;
use crate::services::GalleryFilter;
use crate::state::AppState;
use crate::ui::views::{DetailView, GalleryView, TokensView};
use crate::ui::{ActiveNav, PublicChrome, SidebarView};

/// Create router for the public pages
pub fn create_gallery_router() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/components") }))
        .route("/components", get(gallery))
        .route("/components/:slug", get(component_detail))
        .route("/tokens", get(tokens))
}

// ============================================================================
// Brand selection
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct BrandQuery {
    #[serde(default)]
    pub brand: Option<String>,
}

/// Brand for this request: `?brand=` wins and is remembered in a cookie,
/// then the cookie, then the default brand
struct BrandChoice {
    brand: Brand,
    set_cookie: Option<String>,
}

fn choose_brand(headers: &HeaderMap, requested: Option<&str>) -> BrandChoice {
    if let Some(brand) = requested.and_then(|slug| slug.parse::<Brand>().ok()) {
        return BrandChoice {
            brand,
            set_cookie: Some(brand_cookie(brand.slug())),
        };
    }
    let brand = request_cookie(headers, BRAND_COOKIE)
        .and_then(|slug| slug.parse::<Brand>().ok())
        .unwrap_or_default();
    BrandChoice {
        brand,
        set_cookie: None,
    }
}

fn page_response(status: StatusCode, html: String, set_cookie: Option<String>) -> Response {
    let mut response = (status, Html(html)).into_response();
    if let Some(value) = set_cookie.and_then(|c| HeaderValue::from_str(&c).ok()) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// Catalog reads treat a missing table like an empty catalog
fn empty_if_missing(result: Result<Vec<DsComponent>>) -> Result<(Vec<DsComponent>, bool)> {
    match result {
        Ok(items) => Ok((items, true)),
        Err(DsError::SchemaMissing) => {
            debug!("ds_components table missing; rendering empty catalog");
            Ok((Vec::new(), false))
        }
        Err(e) => Err(e),
    }
}

async fn chrome(
    state: &AppState,
    title: impl Into<String>,
    brand: Brand,
    path: &str,
    active: ActiveNav,
) -> Result<PublicChrome> {
    let (items, _) = empty_if_missing(state.catalog.sidebar_components().await)?;
    Ok(PublicChrome {
        title: title.into(),
        brand,
        path: path.to_string(),
        sidebar: SidebarView::build(&items, &active),
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct GalleryQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
}

async fn gallery(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<GalleryQuery>,
) -> Result<Response> {
    let choice = choose_brand(&headers, query.brand.as_deref());
    let filter = GalleryFilter {
        q: query.q,
        category: query.category,
    };

    let (components, table_ready) = empty_if_missing(state.catalog.gallery_components().await)?;
    let configured = table_ready && state.catalog.is_configured();
    let view = GalleryView::build(&components, &filter, configured);

    let chrome = chrome(&state, "Components", choice.brand, "/components", ActiveNav::Gallery).await?;
    let html = state.pages.public_page(&chrome, "gallery", &view)?;
    Ok(page_response(StatusCode::OK, html, choice.set_cookie))
}

async fn component_detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Query(query): Query<BrandQuery>,
) -> Result<Response> {
    let choice = choose_brand(&headers, query.brand.as_deref());
    let component = match state.catalog.component_by_slug(&slug).await {
        Ok(found) => found,
        Err(DsError::SchemaMissing) => None,
        Err(e) => return Err(e),
    };

    let path = format!("/components/{}", slug);
    let active = ActiveNav::Component(slug);
    match component {
        Some(component) => {
            let chrome = chrome(&state, component.name.clone(), choice.brand, &path, active).await?;
            let html = state
                .pages
                .public_page(&chrome, "component_detail", &DetailView::from(&component))?;
            Ok(page_response(StatusCode::OK, html, choice.set_cookie))
        }
        None => not_found_page(&state, choice, &path).await,
    }
}

async fn tokens(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BrandQuery>,
) -> Result<Response> {
    let choice = choose_brand(&headers, query.brand.as_deref());
    let chrome = chrome(&state, "Design Tokens", choice.brand, "/tokens", ActiveNav::Tokens).await?;
    let html = state
        .pages
        .public_page(&chrome, "tokens", &TokensView::build(choice.brand))?;
    Ok(page_response(StatusCode::OK, html, choice.set_cookie))
}

async fn not_found_page(state: &AppState, choice: BrandChoice, path: &str) -> Result<Response> {
    let chrome = chrome(state, "Not found", choice.brand, path, ActiveNav::Nothing).await?;
    let html = state
        .pages
        .public_page(&chrome, "not_found", &serde_json::json!({}))?;
    Ok(page_response(StatusCode::NOT_FOUND, html, choice.set_cookie))
}

/// Fallback for unknown paths
pub async fn not_found(
    State(state): State<AppState>,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
) -> Result<Response> {
    let choice = choose_brand(&headers, None);
    not_found_page(&state, choice, uri.path()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_brand_prefers_query_then_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("ds_brand=premium-bank"));

        let choice = choose_brand(&headers, Some("kbz-pay"));
        assert_eq!(choice.brand, Brand::KbzPay);
        assert!(choice.set_cookie.unwrap().starts_with("ds_brand=kbz-pay;"));

        let choice = choose_brand(&headers, Some("unknown"));
        assert_eq!(choice.brand, Brand::PremiumBank);
        assert!(choice.set_cookie.is_none());

        let choice = choose_brand(&HeaderMap::new(), None);
        assert_eq!(choice.brand, Brand::KbzBank);
    }

    #[test]
    fn test_missing_table_reads_as_empty() {
        let (items, ready) = empty_if_missing(Err(DsError::SchemaMissing)).unwrap();
        assert!(items.is_empty());
        assert!(!ready);
        assert!(empty_if_missing(Err(DsError::Storage("x".into()))).is_err());
    }
}
