//! Read-only JSON API over the catalog and the design tokens

use axum::{
    extract::{Path, Query, State},
    http::{header, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use ds_types::Brand;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::cache::CacheStats;
use crate::error::{DsError, Result};
use crate::models::DsComponent;
use crate::services::GalleryFilter;
use crate::state::AppState;
use crate::tokens::{stylesheet, token_set, TokenSet};

/// Create router for the JSON API
pub fn create_json_router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/components", get(list_components))
        .route("/api/components/:slug", get(get_component))
        .route("/api/tokens", get(tokens))
        .route("/api/tokens/:brand/css", get(brand_css))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: DatabaseStatus,
    pub cache: CacheStats,
}

#[derive(Debug, Serialize)]
pub struct DatabaseStatus {
    pub configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ComponentsResponse {
    pub total: usize,
    pub components: Vec<DsComponent>,
}

// ============================================================================
// Route Handlers
// ============================================================================

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        database: DatabaseStatus {
            configured: state.catalog.is_configured(),
        },
        cache: state.catalog.cache_stats(),
    })
}

async fn list_components(
    State(state): State<AppState>,
    Query(filter): Query<GalleryFilter>,
) -> Result<Json<ComponentsResponse>> {
    let all = state.catalog.gallery_components().await?;
    let components: Vec<DsComponent> = filter.apply(&all).into_iter().cloned().collect();
    Ok(Json(ComponentsResponse {
        total: all.len(),
        components,
    }))
}

async fn get_component(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DsComponent>> {
    state
        .catalog
        .component_by_slug(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| DsError::NotFound(format!("component '{}'", slug)))
}

async fn tokens() -> Json<TokenSet> {
    Json(token_set())
}

async fn brand_css(Path(brand): Path<String>) -> Result<impl IntoResponse> {
    let brand: Brand = brand
        .parse()
        .map_err(|e: ds_types::TypeParseError| DsError::NotFound(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        stylesheet(brand, ":root"),
    ))
}
