//! Models for the component catalog
//!
//! Data structures for catalog rows as stored in `ds_components` and the
//! insert/patch shapes used by the stores.

pub mod component_models;

// Re-export commonly used types for convenience
pub use component_models::{CategoryCount, DsComponent, DsComponentPatch, NewDsComponent};
