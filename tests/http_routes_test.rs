//! HTTP-level tests for the public pages, the admin console and the JSON API.
//!
//! The router runs against the in-memory component store, so no database is
//! needed. Run with: cargo test --test http_routes_test

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use virya_ds::auth::AdminCredential;
use virya_ds::database::seed::seed_samples;
use virya_ds::database::{InMemoryComponentStore, UnconfiguredStore};
use virya_ds::models::DsComponentPatch;
use virya_ds::{
    build_router, AppConfig, AppState, ComponentStore, DsComponent, DsError, NewDsComponent,
};

const ADMIN_EMAIL: &str = "admin@virya.dev";
const ADMIN_PASSWORD: &str = "correct-horse";
const BOUNDARY: &str = "virya-test-boundary";

// ── Test app builder ───────────────────────────────────────────

struct TestApp {
    router: Router,
    _uploads: TempDir,
}

fn test_config(uploads: &TempDir) -> AppConfig {
    AppConfig {
        jwt_secret: "test-secret-for-http-tests".to_string(),
        admins: vec![AdminCredential::from_password(ADMIN_EMAIL, ADMIN_PASSWORD)],
        upload_dir: uploads.path().to_path_buf(),
        ..AppConfig::default()
    }
}

async fn seeded_app() -> TestApp {
    let store = Arc::new(InMemoryComponentStore::new());
    seed_samples(store.as_ref()).await.unwrap();
    app_with_store(store)
}

fn app_with_store(store: Arc<dyn ComponentStore>) -> TestApp {
    let uploads = TempDir::new().unwrap();
    let state = AppState::new(&test_config(&uploads), store).unwrap();
    TestApp {
        router: build_router(state),
        _uploads: uploads,
    }
}

/// A configured store whose table has not been created yet
struct MissingTableStore;

#[async_trait]
impl ComponentStore for MissingTableStore {
    async fn list_by_name(&self) -> virya_ds::Result<Vec<DsComponent>> {
        Err(DsError::SchemaMissing)
    }

    async fn list_by_category(&self) -> virya_ds::Result<Vec<DsComponent>> {
        Err(DsError::SchemaMissing)
    }

    async fn find_by_slug(&self, _slug: &str) -> virya_ds::Result<Option<DsComponent>> {
        Err(DsError::SchemaMissing)
    }

    async fn find_by_id(&self, _id: Uuid) -> virya_ds::Result<Option<DsComponent>> {
        Err(DsError::SchemaMissing)
    }

    async fn insert(&self, _actor: &str, _component: NewDsComponent) -> virya_ds::Result<DsComponent> {
        Err(DsError::SchemaMissing)
    }

    async fn update(
        &self,
        _actor: &str,
        _id: Uuid,
        _patch: DsComponentPatch,
    ) -> virya_ds::Result<DsComponent> {
        Err(DsError::SchemaMissing)
    }

    async fn delete(&self, _actor: &str, _id: Uuid) -> virya_ds::Result<()> {
        Err(DsError::SchemaMissing)
    }

    async fn upsert_by_slug(
        &self,
        _actor: &str,
        _component: NewDsComponent,
    ) -> virya_ds::Result<DsComponent> {
        Err(DsError::SchemaMissing)
    }

    async fn count(&self) -> virya_ds::Result<usize> {
        Err(DsError::SchemaMissing)
    }
}

// ── Request helpers ────────────────────────────────────────────

async fn send(app: &TestApp, request: Request<Body>) -> axum::response::Response {
    app.router.clone().oneshot(request).await.unwrap()
}

async fn get(app: &TestApp, uri: &str, cookie: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// `name=value` pair of the first `Set-Cookie` header starting with `name=`
fn set_cookie(response: &axum::response::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{}=", name)))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

async fn component_id(app: &TestApp, slug: &str) -> String {
    let component = body_json(get(app, &format!("/api/components/{}", slug), None).await).await;
    component["id"].as_str().unwrap().to_string()
}

async fn sign_in(app: &TestApp) -> String {
    let body = format!(
        "email={}&password={}",
        ADMIN_EMAIL.replace('@', "%40"),
        ADMIN_PASSWORD
    );
    let request = Request::builder()
        .method("POST")
        .uri("/admin/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/dashboard");
    set_cookie(&response, "ds_session").expect("session cookie")
}

#[derive(Clone, Copy)]
enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, content_type, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn post_multipart(
    app: &TestApp,
    uri: &str,
    cookie: &str,
    parts: &[Part<'_>],
) -> axum::response::Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

// ── Public pages ───────────────────────────────────────────────

#[tokio::test]
async fn test_root_redirects_to_gallery() {
    let app = seeded_app().await;
    let response = get(&app, "/", None).await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/components");
}

#[tokio::test]
async fn test_gallery_lists_and_filters_components() {
    let app = seeded_app().await;

    let response = get(&app, "/components", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Component Gallery"));
    assert!(html.contains("5 components"));
    assert!(html.contains("href=\"/components/button\""));
    assert!(!html.contains("Database not set up yet"));

    let html = body_text(get(&app, "/components?q=modal", None).await).await;
    assert!(html.contains("Showing 1 of 5 components"));
    assert!(html.contains("<h3>Modal</h3>"));
    assert!(!html.contains("<h3>Button</h3>"));
}

#[tokio::test]
async fn test_component_detail_and_missing_slug() {
    let app = seeded_app().await;

    let response = get(&app, "/components/button", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Code Playground"));
    assert!(html.contains("<h2>When to use</h2>"));

    let response = get(&app, "/components/does-not-exist", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found"));

    let response = get(&app, "/no/such/page", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_brand_query_sets_cookie_and_cookie_is_honoured() {
    let app = seeded_app().await;

    let response = get(&app, "/tokens?brand=kbz-pay", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        set_cookie(&response, "ds_brand").as_deref(),
        Some("ds_brand=kbz-pay")
    );
    let html = body_text(response).await;
    assert!(html.contains("Design Tokens"));
    assert!(html.contains("<option value=\"kbz-pay\" selected>"));

    let html = body_text(get(&app, "/tokens", Some("ds_brand=premium-bank")).await).await;
    assert!(html.contains("<option value=\"premium-bank\" selected>"));
    assert!(html.contains("/api/tokens/premium-bank/css"));
}

#[tokio::test]
async fn test_unconfigured_catalog_renders_empty_gallery() {
    let app = app_with_store(Arc::new(UnconfiguredStore));
    let response = get(&app, "/components", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Database not set up yet"));
    assert!(html.contains("No components yet"));
}

// ── Admin console ──────────────────────────────────────────────

#[tokio::test]
async fn test_admin_pages_require_session() {
    let app = seeded_app().await;

    for uri in ["/admin/dashboard", "/admin/dashboard/new"] {
        let response = get(&app, uri, None).await;
        assert!(response.status().is_redirection(), "{}", uri);
        assert_eq!(location(&response), "/admin/login");
    }

    let response = get(&app, "/admin/dashboard", Some("ds_session=forged")).await;
    assert_eq!(location(&response), "/admin/login");
}

#[tokio::test]
async fn test_login_rejects_bad_password() {
    let app = seeded_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/admin/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("email=admin%40virya.dev&password=wrong"))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response, "ds_session").is_none());
    assert!(body_text(response).await.contains("Invalid login credentials"));
}

#[tokio::test]
async fn test_create_component_appears_in_gallery() {
    let app = seeded_app().await;
    let cookie = sign_in(&app).await;

    let dashboard = body_text(get(&app, "/admin/dashboard", Some(&cookie)).await).await;
    assert!(dashboard.contains(ADMIN_EMAIL));

    // Prime the gallery cache before the write
    let before = body_text(get(&app, "/components", None).await).await;
    assert!(!before.contains("Tooltip"));

    let response = post_multipart(
        &app,
        "/admin/dashboard/new",
        &cookie,
        &[
            Part::Text("name", "Tooltip"),
            Part::Text("slug", ""),
            Part::Text("category", "Atoms"),
            Part::Text("description", "Short hint on hover"),
            Part::Text("usage_markdown", "## When to use\n\nSparingly."),
            Part::Text("code", "<Tooltip label=\"Hi\" />"),
            Part::Text("save", "1"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/dashboard");

    let after = body_text(get(&app, "/components", None).await).await;
    assert!(after.contains("6 components"));
    assert!(after.contains("href=\"/components/tooltip\""));

    let detail = get(&app, "/components/tooltip", None).await;
    assert_eq!(detail.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_without_code_rerenders_form() {
    let app = seeded_app().await;
    let cookie = sign_in(&app).await;

    let response = post_multipart(
        &app,
        "/admin/dashboard/new",
        &cookie,
        &[
            Part::Text("name", "Draft"),
            Part::Text("category", "Molecules"),
            Part::Text("code", "   "),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("Name, slug, and code are required."));
    assert!(html.contains("value=\"Draft\""));
}

#[tokio::test]
async fn test_duplicate_slug_is_conflict() {
    let app = seeded_app().await;
    let cookie = sign_in(&app).await;

    let response = post_multipart(
        &app,
        "/admin/dashboard/new",
        &cookie,
        &[
            Part::Text("name", "Button Copy"),
            Part::Text("slug", "button"),
            Part::Text("category", "Atoms"),
            Part::Text("code", "<Button />"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_upload_requires_image_and_is_served() {
    let app = seeded_app().await;
    let cookie = sign_in(&app).await;

    let response = post_multipart(
        &app,
        "/admin/upload",
        &cookie,
        &[Part::File("file", "notes.txt", "text/plain", b"hello")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let png: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let response = post_multipart(
        &app,
        "/admin/upload",
        &cookie,
        &[Part::File("file", "preview.PNG", "image/png", png)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let url = body_json(response).await["url"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".png"));

    let served = get(&app, &url, None).await;
    assert_eq!(served.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_upload_is_served_as_its_image_type() {
    let app = seeded_app().await;
    let cookie = sign_in(&app).await;

    let response = post_multipart(
        &app,
        "/admin/upload",
        &cookie,
        &[Part::File("file", "x.html", "image/png", b"<script>alert(1)</script>")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let url = body_json(response).await["url"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(url.ends_with(".png"), "{}", url);

    let served = get(&app, &url, None).await;
    assert_eq!(served.status(), StatusCode::OK);
    let content_type = served
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(!content_type.starts_with("text/html"));
    assert_eq!(content_type, "image/png");

    let response = post_multipart(
        &app,
        "/admin/upload",
        &cookie,
        &[Part::File("file", "logo.svg", "image/svg+xml", b"<svg onload=\"alert(1)\"/>")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_form_upload_action_keeps_editing() {
    let app = seeded_app().await;
    let cookie = sign_in(&app).await;

    let png: &[u8] = &[0x89, b'P', b'N', b'G'];
    let response = post_multipart(
        &app,
        "/admin/dashboard/new",
        &cookie,
        &[
            Part::Text("name", "Avatar"),
            Part::Text("category", "Atoms"),
            Part::Text("code", "<Avatar />"),
            Part::File("images", "avatar.png", "image/png", png),
            Part::Text("upload", "1"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("New Component"));
    assert!(html.contains("/uploads/"));
    assert!(html.contains("value=\"Avatar\""));
}

#[tokio::test]
async fn test_form_image_actions_rerender_form() {
    let app = seeded_app().await;
    let cookie = sign_in(&app).await;

    let fields = [
        Part::Text("name", "Avatar"),
        Part::Text("category", "Atoms"),
        Part::Text("code", "<Avatar />"),
        Part::Text("thumbnail_url", "/uploads/a.png"),
        Part::Text("image_urls", "/uploads/a.png"),
        Part::Text("image_urls", "/uploads/b.png"),
    ];

    let mut parts: Vec<Part> = fields.to_vec();
    parts.push(Part::Text("select_thumbnail", "1"));
    let response = post_multipart(&app, "/admin/dashboard/new", &cookie, &parts).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("name=\"thumbnail_url\" value=\"/uploads/b.png\""));
    assert!(html.contains("name=\"image_urls\" value=\"/uploads/a.png\""));

    let mut parts: Vec<Part> = fields.to_vec();
    parts.push(Part::Text("remove_image", "0"));
    let response = post_multipart(&app, "/admin/dashboard/new", &cookie, &parts).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(!html.contains("/uploads/a.png"));
    assert!(html.contains("name=\"image_urls\" value=\"/uploads/b.png\""));
    // The removed image was the thumbnail, so the next one takes over
    assert!(html.contains("name=\"thumbnail_url\" value=\"/uploads/b.png\""));

    // Nothing was saved
    let gallery = body_text(get(&app, "/components", None).await).await;
    assert!(gallery.contains("5 components"));
}

#[tokio::test]
async fn test_edit_component_revalidates_detail() {
    let app = seeded_app().await;
    let cookie = sign_in(&app).await;
    let id = component_id(&app, "button").await;

    // Prime the detail cache before the write
    let before = body_text(get(&app, "/components/button", None).await).await;
    assert!(!before.contains("Rounded pill buttons only"));

    let edit_uri = format!("/admin/dashboard/{}/edit", id);
    let form = body_text(get(&app, &edit_uri, Some(&cookie)).await).await;
    assert!(form.contains("value=\"Button\""));

    let response = post_multipart(
        &app,
        &edit_uri,
        &cookie,
        &[
            Part::Text("name", "Button"),
            Part::Text("slug", "button"),
            Part::Text("category", "Atoms"),
            Part::Text("description", "Rounded pill buttons only"),
            Part::Text("code", "<Button />"),
            Part::Text("save", "1"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/dashboard");

    let after = body_text(get(&app, "/components/button", None).await).await;
    assert!(after.contains("Rounded pill buttons only"));

    let missing = get(
        &app,
        &format!("/admin/dashboard/{}/edit", Uuid::new_v4()),
        Some(&cookie),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_component_removes_it_from_gallery() {
    let app = seeded_app().await;
    let cookie = sign_in(&app).await;
    let id = component_id(&app, "card").await;

    let before = body_text(get(&app, "/components", None).await).await;
    assert!(before.contains("href=\"/components/card\""));
    assert_eq!(get(&app, "/components/card", None).await.status(), StatusCode::OK);

    let request = Request::builder()
        .method("POST")
        .uri(format!("/admin/dashboard/{}/delete", id))
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/dashboard");

    let after = body_text(get(&app, "/components", None).await).await;
    assert!(after.contains("4 components"));
    assert!(!after.contains("href=\"/components/card\""));
    assert_eq!(
        get(&app, "/components/card", None).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_dashboard_sends_admin_to_setup_when_table_missing() {
    let app = app_with_store(Arc::new(MissingTableStore));
    let cookie = sign_in(&app).await;

    let response = get(&app, "/admin/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/setup");

    let setup = get(&app, "/admin/setup", None).await;
    assert_eq!(setup.status(), StatusCode::OK);
    assert!(body_text(setup).await.contains("ds_components"));
}

#[tokio::test]
async fn test_dashboard_without_database_explains_configuration() {
    let app = app_with_store(Arc::new(UnconfiguredStore));
    let cookie = sign_in(&app).await;

    for uri in ["/admin/dashboard", "/admin/dashboard/new"] {
        let response = get(&app, uri, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let html = body_text(response).await;
        assert!(html.contains("Database not configured"));
        assert!(html.contains("DATABASE_URL"));
    }
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = seeded_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/admin/logout")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(location(&response), "/admin/login");
    assert_eq!(
        set_cookie(&response, "ds_session").as_deref(),
        Some("ds_session=")
    );
}

// ── JSON API ───────────────────────────────────────────────────

#[tokio::test]
async fn test_json_api() {
    let app = seeded_app().await;

    let health = body_json(get(&app, "/api/health", None).await).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["database"]["configured"], true);

    let list = body_json(get(&app, "/api/components?category=Atoms", None).await).await;
    assert_eq!(list["total"], 5);
    let names: Vec<&str> = list["components"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert!(names.contains(&"Button"));
    assert!(!names.contains(&"Modal"));

    let one = body_json(get(&app, "/api/components/card", None).await).await;
    assert_eq!(one["slug"], "card");

    let missing = get(&app, "/api/components/nope", None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let tokens = body_json(get(&app, "/api/tokens", None).await).await;
    assert_eq!(tokens["brands"].as_array().unwrap().len(), 3);

    let css = get(&app, "/api/tokens/kbz-bank/css", None).await;
    assert_eq!(css.status(), StatusCode::OK);
    assert!(body_text(css).await.starts_with(":root {"));

    let unknown = get(&app, "/api/tokens/acme/css", None).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}
