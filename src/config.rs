// src/config.rs
// =============================================================================
// Runtime configuration, built once in main.rs and passed by reference to
// the transport and the downloader.
//
// Defaults match a stock Tor daemon on the local machine:
//   proxy      socks5h://127.0.0.1:9050 (the 'h' makes Tor resolve .onion)
//   workers    10 concurrent downloads
//   timeout    30 seconds per request
//   retries    3 retries after the first attempt
// =============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ScrapeError;
use crate::media::MediaKind;

pub const DEFAULT_PROXY: &str = "socks5h://127.0.0.1:9050";
pub const DEFAULT_OUTPUT_DIR: &str = "downloads";
pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRY_LIMIT: u32 = 3;

/// Sent with every request so the hidden service sees an ordinary browser
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const VIDEO_SUBDIR: &str = "videos";
const IMAGE_SUBDIR: &str = "images";

#[derive(Debug, Clone)]
pub struct Config {
    /// SOCKS proxy every request is routed through.
    /// `None` talks to the network directly, which only tests do.
    pub proxy: Option<String>,
    /// Root folder holding `videos/` and `images/`
    pub output_dir: PathBuf,
    /// Maximum number of downloads in flight
    pub workers: usize,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries after the first failed attempt
    pub retry_limit: u32,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            proxy: Some(DEFAULT_PROXY.to_string()),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            workers: DEFAULT_WORKERS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_limit: DEFAULT_RETRY_LIMIT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl Config {
    pub fn video_dir(&self) -> PathBuf {
        self.output_dir.join(VIDEO_SUBDIR)
    }

    pub fn image_dir(&self) -> PathBuf {
        self.output_dir.join(IMAGE_SUBDIR)
    }

    /// Videos get their own folder, both image kinds share one
    pub fn dir_for(&self, kind: MediaKind) -> PathBuf {
        if kind.is_video() {
            self.video_dir()
        } else {
            self.image_dir()
        }
    }

    /// Creates the output folders. Safe to call when they already exist.
    pub fn prepare_dirs(&self) -> Result<(), ScrapeError> {
        for dir in [self.video_dir(), self.image_dir()] {
            create_dir(&dir)?;
        }
        Ok(())
    }
}

fn create_dir(path: &Path) -> Result<(), ScrapeError> {
    std::fs::create_dir_all(path).map_err(|source| ScrapeError::Io {
        path: path.to_path_buf(),
        source,
    })
}
