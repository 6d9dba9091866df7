// src/fetch/mod.rs
// =============================================================================
// Network access through the anonymizing proxy.
//
// Submodules:
// - transport: builds the proxied reqwest::Client from the Config
// - page: fetches the HTML of the target page (no retry)
// =============================================================================

mod page;
mod transport;

pub use page::fetch_page;
pub use transport::build_client;
