// src/media/mod.rs
// =============================================================================
// Media link discovery.
//
// Submodules:
// - catalog: MediaKind and the per-page MediaCatalog
// - extract: finds media links in HTML and resolves them to absolute URLs
// =============================================================================

mod catalog;
mod extract;

pub use catalog::{MediaCatalog, MediaKind};
pub use extract::extract_media_links;
