//! Font catalog management for the font-shuffle effect.
//!
//! This crate provides:
//! - Catalog construction from host-provided family names or a `fontdb`
//!   database (the host decides what goes in — no OS enumeration here)
//! - Japanese/English classification of family names
//! - Mode-dependent active-list resolution with a guaranteed-non-empty
//!   fallback chain
//! - A catalog service with an async-load/sync-read snapshot contract
//!
//! # Architecture
//!
//! The render path never loads anything. It reads the last-published
//! [`FontCatalog`] snapshot from a [`CatalogService`] and asks it for the
//! active font list of the configured shuffle mode. Loading happens on a
//! background thread and publishes a new snapshot when done; until then
//! readers see the previous (possibly default) catalog.

pub mod catalog;
mod classify;
mod fallbacks;
pub mod service;

// Re-export main types for convenience
pub use catalog::{FontCatalog, UserLists};
pub use classify::is_japanese_family;
pub use fallbacks::{FALLBACK_FAMILIES, UNIVERSAL_FALLBACK};
pub use service::{CatalogProgress, CatalogService, LoadContext, LoadOutcome};
