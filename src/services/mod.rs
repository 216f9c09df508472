//! Services for the component catalog
//!
//! Business logic between the HTTP layer and the component store.

pub mod catalog_service;
pub mod gallery;

pub use catalog_service::{category_stats, CatalogService, ComponentInput, CACHE_TAG};
pub use gallery::{category_counts, group_by_category, GalleryFilter};
