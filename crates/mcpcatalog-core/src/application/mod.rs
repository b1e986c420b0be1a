//! Application services
//!
//! Orchestrate domain operations over the repositories and emit a
//! `CatalogEvent` after every successful change.

mod catalog;

pub use catalog::{CatalogAppService, CatalogError, CatalogResult};
