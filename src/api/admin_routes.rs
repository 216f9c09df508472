//! Admin console routes
//!
//! Sign-in, setup guide, dashboard and the create/edit form. Everything
//! below `/admin/dashboard` and the upload endpoint requires an
//! `AdminSession`; unauthenticated requests are redirected to the login page.
//!
//! The component form is a plain multipart form. Besides saving, it posts
//! back to itself to upload images, drop an image or pick the thumbnail;
//! those actions re-render the form with the edited values.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::auth::{clear_session_cookie, AdminSession, AdminUser, LOGIN_PATH};
use crate::database::SCHEMA_SQL;
use crate::error::{DsError, Result};
use crate::services::{category_stats, ComponentInput};
use crate::state::AppState;
use crate::ui::views::{DashboardView, FormView, LoginView, SetupView};
use crate::ui::AdminNav;

const DASHBOARD_PATH: &str = "/admin/dashboard";
const SETUP_PATH: &str = "/admin/setup";

/// Create router for the admin console
pub fn create_admin_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/admin", get(|| async { Redirect::to(DASHBOARD_PATH) }))
        .route("/admin/login", get(login_page).post(login))
        .route("/admin/logout", post(logout))
        .route("/admin/setup", get(setup_page))
        .route("/admin/dashboard", get(dashboard))
        .route(
            "/admin/dashboard/new",
            get(new_component_page).post(create_component),
        )
        .route(
            "/admin/dashboard/:id/edit",
            get(edit_component_page).post(update_component),
        )
        .route("/admin/dashboard/:id/delete", post(delete_component))
        .route("/admin/upload", post(upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

/// What a form post asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormAction {
    Save,
    Upload,
    RemoveImage(usize),
    SelectThumbnail(usize),
}

#[derive(Debug)]
struct FileUpload {
    file_name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

#[derive(Debug)]
struct FormSubmission {
    input: ComponentInput,
    action: FormAction,
    files: Vec<FileUpload>,
}

#[derive(Debug, Clone, Copy)]
enum FormTarget {
    New,
    Edit(Uuid),
}

// ============================================================================
// Helpers
// ============================================================================

fn multipart_error(e: axum::extract::multipart::MultipartError) -> DsError {
    DsError::Validation(format!("Invalid form data: {}", e))
}

fn parse_index(value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| DsError::Validation(format!("Invalid image index '{}'", value)))
}

async fn read_form(mut multipart: Multipart) -> Result<FormSubmission> {
    let mut input = ComponentInput::default();
    let mut action = FormAction::Save;
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "images" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(multipart_error)?;
            if !file_name.is_empty() && !bytes.is_empty() {
                files.push(FileUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        match name.as_str() {
            "name" => input.name = value,
            "slug" => input.slug = value,
            "category" => {
                input.category = value
                    .parse()
                    .map_err(|e: ds_types::TypeParseError| DsError::Validation(e.to_string()))?
            }
            "description" => input.description = value,
            "usage_markdown" => input.usage_markdown = value,
            "code" => input.code = value,
            "thumbnail_url" => input.thumbnail_url = value,
            "image_urls" => input.image_urls.push(value),
            "upload" => action = FormAction::Upload,
            "remove_image" => action = FormAction::RemoveImage(parse_index(&value)?),
            "select_thumbnail" => action = FormAction::SelectThumbnail(parse_index(&value)?),
            _ => {}
        }
    }

    Ok(FormSubmission {
        input,
        action,
        files,
    })
}

/// Store one uploaded image, returning its public URL. The blob store
/// rejects anything but an accepted image type.
async fn store_image(
    state: &AppState,
    file_name: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<String> {
    let blob = state.blobs.put(file_name, bytes, content_type).await?;
    Ok(blob.public_url)
}

fn render_form(
    state: &AppState,
    admin: &AdminUser,
    target: FormTarget,
    input: ComponentInput,
    error: Option<String>,
) -> Result<Html<String>> {
    let (title, nav, view) = match target {
        FormTarget::New => (
            "New Component",
            AdminNav::NewComponent,
            FormView::new_component(input, error),
        ),
        FormTarget::Edit(id) => (
            "Edit Component",
            AdminNav::Nothing,
            FormView::edit_component(id, input, error),
        ),
    };
    Ok(Html(
        state.pages.admin_page(title, admin, nav, "admin_form", &view)?,
    ))
}

fn env_setup_page(state: &AppState, admin: &AdminUser) -> Result<Response> {
    let html = state.pages.admin_page(
        "Configure Database",
        admin,
        AdminNav::Nothing,
        "env_setup",
        &serde_json::json!({}),
    )?;
    Ok(Html(html).into_response())
}

fn admin_not_found(state: &AppState) -> Result<Response> {
    let html = state
        .pages
        .bare_page("Not found", "not_found", &serde_json::json!({}))?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}

// ============================================================================
// Route Handlers
// ============================================================================

async fn login_page(State(state): State<AppState>) -> Result<Html<String>> {
    Ok(Html(state.pages.bare_page(
        "Sign in",
        "admin_login",
        &LoginView::default(),
    )?))
}

async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Result<Response> {
    match state.identity.sign_in(&form.email, &form.password).await {
        Ok(user) => {
            let token = state.sessions.issue(&user)?;
            let cookie = HeaderValue::from_str(&state.sessions.session_cookie(&token))
                .map_err(|e| DsError::Unauthorized(format!("cannot set session cookie: {}", e)))?;
            let mut response = Redirect::to(DASHBOARD_PATH).into_response();
            response.headers_mut().append(header::SET_COOKIE, cookie);
            Ok(response)
        }
        Err(DsError::Unauthorized(message)) => {
            let view = LoginView {
                email: form.email,
                error: Some(message),
            };
            let html = state.pages.bare_page("Sign in", "admin_login", &view)?;
            Ok((StatusCode::UNAUTHORIZED, Html(html)).into_response())
        }
        Err(e) => Err(e),
    }
}

async fn logout() -> Response {
    let mut response = Redirect::to(LOGIN_PATH).into_response();
    if let Ok(cookie) = HeaderValue::from_str(&clear_session_cookie()) {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}

async fn setup_page(State(state): State<AppState>) -> Result<Html<String>> {
    let view = SetupView::new(state.catalog.is_configured(), SCHEMA_SQL);
    Ok(Html(state.pages.bare_page("Setup", "admin_setup", &view)?))
}

async fn dashboard(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
) -> Result<Response> {
    if !state.catalog.is_configured() {
        return env_setup_page(&state, &admin);
    }

    let items = match state.catalog.dashboard_components().await {
        Ok(items) => items,
        Err(DsError::SchemaMissing) => {
            warn!("ds_components table missing; sending admin to setup");
            return Ok(Redirect::to(SETUP_PATH).into_response());
        }
        Err(e) => return Err(e),
    };

    let view = DashboardView::build(&items, category_stats(&items));
    let html = state.pages.admin_page(
        "Dashboard",
        &admin,
        AdminNav::Dashboard,
        "admin_dashboard",
        &view,
    )?;
    Ok(Html(html).into_response())
}

async fn new_component_page(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
) -> Result<Response> {
    if !state.catalog.is_configured() {
        return env_setup_page(&state, &admin);
    }
    Ok(render_form(&state, &admin, FormTarget::New, ComponentInput::default(), None)?.into_response())
}

async fn create_component(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    multipart: Multipart,
) -> Result<Response> {
    submit_form(&state, &admin, FormTarget::New, multipart).await
}

async fn edit_component_page(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    if !state.catalog.is_configured() {
        return env_setup_page(&state, &admin);
    }
    match state.catalog.component_by_id(id).await? {
        Some(component) => {
            let input = ComponentInput::from_component(&component);
            Ok(render_form(&state, &admin, FormTarget::Edit(id), input, None)?.into_response())
        }
        None => admin_not_found(&state),
    }
}

async fn update_component(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Response> {
    submit_form(&state, &admin, FormTarget::Edit(id), multipart).await
}

async fn submit_form(
    state: &AppState,
    admin: &AdminUser,
    target: FormTarget,
    multipart: Multipart,
) -> Result<Response> {
    let FormSubmission {
        mut input,
        action,
        files,
    } = read_form(multipart).await?;

    let mut uploaded = Vec::with_capacity(files.len());
    for file in &files {
        match store_image(state, &file.file_name, file.content_type.as_deref(), &file.bytes).await {
            Ok(url) => uploaded.push(url),
            Err(e) => {
                input.add_images(uploaded);
                let page = render_form(state, admin, target, input, Some(e.user_message()))?;
                return Ok((e.status_code(), page).into_response());
            }
        }
    }
    input.add_images(uploaded);

    match action {
        FormAction::Upload => {}
        FormAction::RemoveImage(index) => input.remove_image(index),
        FormAction::SelectThumbnail(index) => input.select_thumbnail(index),
        FormAction::Save => {
            let saved = match target {
                FormTarget::New => state.catalog.create(&admin.email, &input).await,
                FormTarget::Edit(id) => state.catalog.update(&admin.email, id, &input).await,
            };
            return match saved {
                Ok(component) => {
                    info!("{} saved component {}", admin.email, component.slug);
                    Ok(Redirect::to(DASHBOARD_PATH).into_response())
                }
                Err(e) => {
                    if e.status_code().is_server_error() {
                        error!("Saving component failed: {}", e);
                    }
                    let status = e.status_code();
                    let page = render_form(state, admin, target, input, Some(e.user_message()))?;
                    Ok((status, page).into_response())
                }
            };
        }
    }

    Ok(render_form(state, admin, target, input, None)?.into_response())
}

async fn delete_component(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Redirect> {
    state.catalog.delete(&admin.email, id).await?;
    Ok(Redirect::to(DASHBOARD_PATH))
}

/// Single-file upload used by scripts and the JSON API; field `file`
async fn upload(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        let url = store_image(&state, &file_name, content_type.as_deref(), &bytes).await?;
        return Ok(Json(UploadResponse { url }));
    }
    Err(DsError::Validation("No file provided".to_string()))
}
