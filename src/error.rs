// src/error.rs
// =============================================================================
// Error kinds produced by the pipeline components.
//
// Only InvalidAddress stops the program (and it does so before any network
// activity). FetchFailure aborts a single page, DownloadFailure a single
// task. main.rs turns everything into an exit code with anyhow.
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The target does not look like a v3 .onion address
    #[error("invalid .onion URL '{0}': must be a valid v3 .onion (56 characters)")]
    InvalidAddress(String),

    /// The page itself could not be retrieved
    #[error("error fetching {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    /// One attempt at downloading a media file failed
    #[error("{reason}")]
    DownloadFailure { url: String, reason: String },

    /// The HTTP client could not be built (bad proxy URL, TLS backend, ...)
    #[error("could not build HTTP client: {0}")]
    Transport(#[from] reqwest::Error),

    /// Local filesystem problem outside of a single download
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScrapeError {
    /// Builds a DownloadFailure from a reqwest error, keeping the
    /// timeout / connect / status distinction in the message.
    pub fn from_request(url: &str, error: &reqwest::Error) -> Self {
        let reason = describe_request_error(error);
        ScrapeError::DownloadFailure {
            url: url.to_string(),
            reason,
        }
    }
}

// Turns a reqwest error into a short human readable cause
pub fn describe_request_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if let Some(status) = error.status() {
        format!("HTTP {}", status.as_u16())
    } else if error.is_connect() {
        format!("connection failed (is Tor running?): {}", error)
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_address_message_names_input() {
        let err = ScrapeError::InvalidAddress("http://example.com".to_string());
        let message = err.to_string();
        assert!(message.contains("http://example.com"));
        assert!(message.contains("56 characters"));
    }

    #[test]
    fn test_download_failure_displays_reason_only() {
        let err = ScrapeError::DownloadFailure {
            url: "http://x/a.jpg".to_string(),
            reason: "HTTP 503".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503");
    }
}
