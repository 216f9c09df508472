//! HTTP surface: public pages, the admin console and the JSON API

use axum::{
    http::{header, HeaderValue},
    response::IntoResponse,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::ui::{SITE_CSS, SITE_JS};

pub mod admin_routes;
pub mod gallery_routes;
pub mod json_routes;

pub use admin_routes::create_admin_router;
pub use gallery_routes::create_gallery_router;
pub use json_routes::create_json_router;

/// Build the full axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(create_gallery_router())
        .merge(create_admin_router(state.uploads.max_bytes))
        .merge(create_json_router())
        .route("/assets/site.css", get(site_css))
        .route("/assets/site.js", get(site_js))
        .fallback(gallery_routes::not_found);

    // Blobs are only served locally when they live under a local path
    if state.uploads.public_path.starts_with('/') {
        router = router.nest_service(
            &state.uploads.public_path,
            ServeDir::new(&state.uploads.dir),
        );
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                )),
        )
        .with_state(state)
}

async fn site_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], SITE_CSS)
}

async fn site_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        SITE_JS,
    )
}
