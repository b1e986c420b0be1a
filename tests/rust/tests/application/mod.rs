//! Application service tests
//!
//! Catalog import, enrichment, and workspace installs over mock repositories,
//! including the events each operation emits.
