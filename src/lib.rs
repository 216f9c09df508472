//! Virya design system catalog
//!
//! Documentation site for the Virya design system: a public component
//! gallery with usage guides and code samples, a design-tokens reference for
//! the three brands, and an admin console that curates the catalog.
//!
//! ## Layout
//!
//! ```text
//! api        axum routers (public pages, admin console, JSON API)
//! ui         handlebars page rendering and view models
//! services   catalog reads/writes behind the tagged cache
//! database   Postgres repository, in-memory store, sample seeding
//! storage    image blob storage
//! tokens     static design-token tables and CSS variable generation
//! auth       admin sign-in and session cookies
//! ```

// Core error handling
pub mod error;

// Configuration from the environment
pub mod config;

// Catalog data model and persistence
pub mod database;
pub mod models;
pub mod slug;

// Read-through cache and catalog services
pub mod cache;
pub mod services;

// Design tokens
pub mod tokens;

// Rendering
pub mod markdown;
pub mod ui;

// Admin identity and blob storage
pub mod auth;
pub mod storage;

// HTTP surface (when the server feature is enabled)
#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod state;

// Public re-exports
pub use config::AppConfig;
pub use database::{
    ComponentStore, DatabaseConfig, DatabaseManager, InMemoryComponentStore, PgComponentRepository,
    UnconfiguredStore,
};
pub use error::{DsError, Result};
pub use models::{DsComponent, NewDsComponent};
pub use services::{CatalogService, ComponentInput, GalleryFilter};

#[cfg(feature = "server")]
pub use api::build_router;
#[cfg(feature = "server")]
pub use state::AppState;

pub use ds_types::{Brand, Category, TypographyLocale};
