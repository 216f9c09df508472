//! Error handling for the design system catalog
//!
//! A single error enum covers the catalog, storage, session and rendering
//! layers. Database errors are classified so that a missing schema or a
//! duplicate slug surface as their own variants instead of opaque driver
//! failures.

use thiserror::Error;

/// Postgres SQLSTATE for `undefined_table`
const PG_UNDEFINED_TABLE: &str = "42P01";
/// Postgres SQLSTATE for `unique_violation`
const PG_UNIQUE_VIOLATION: &str = "23505";

/// Main error type for the design system
#[derive(Error, Debug)]
pub enum DsError {
    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Table ds_components does not exist; run the setup schema first")]
    SchemaMissing,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DsError>;

impl From<sqlx::Error> for DsError {
    fn from(error: sqlx::Error) -> Self {
        let code = error
            .as_database_error()
            .and_then(|db| db.code().map(|c| c.into_owned()));
        match code.as_deref() {
            Some(PG_UNDEFINED_TABLE) => DsError::SchemaMissing,
            Some(PG_UNIQUE_VIOLATION) => {
                DsError::Conflict("A component with this slug already exists".to_string())
            }
            _ => DsError::Database(error),
        }
    }
}

impl From<handlebars::RenderError> for DsError {
    fn from(error: handlebars::RenderError) -> Self {
        DsError::Render(error.to_string())
    }
}

impl From<handlebars::TemplateError> for DsError {
    fn from(error: handlebars::TemplateError) -> Self {
        DsError::Render(error.to_string())
    }
}

impl DsError {
    /// Message safe to show to an end user
    pub fn user_message(&self) -> String {
        match self {
            DsError::Database(_) | DsError::Io(_) | DsError::Serialization(_) => {
                "Something went wrong.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(feature = "server")]
mod response {
    use super::DsError;
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    };
    use serde_json::json;

    impl DsError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                DsError::Validation(_) => StatusCode::BAD_REQUEST,
                DsError::NotFound(_) => StatusCode::NOT_FOUND,
                DsError::Conflict(_) => StatusCode::CONFLICT,
                DsError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                DsError::NotConfigured(_) | DsError::SchemaMissing => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for DsError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            if status.is_server_error() {
                tracing::error!("Request failed: {}", self);
            }
            (status, Json(json!({ "error": self.user_message() }))).into_response()
        }
    }
}
