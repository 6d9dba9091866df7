// src/download/file.rs
// =============================================================================
// Downloads a single media file.
//
// For each task:
// 1. Derive a filename from the last path segment (or a hash of the URL)
// 2. Pick the folder: videos/ for mp4, images/ for jpg and png
// 3. If the file is already there, skip it without touching the network
// 4. Otherwise stream the body into "<name>.part" and rename it into place
// 5. On any failure start again from step 3, at most retry_limit more times
//
// Step 3 is what makes re-running the tool cheap: everything that finished
// last time is skipped. The check is not atomic with the write, so two tasks
// for the same filename may both download it.
// =============================================================================

use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::Client;
use sha2::{Digest, Sha256};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;
use url::Url;

use super::outcome::{DownloadOutcome, DownloadStatus, DownloadTask};
use crate::config::Config;
use crate::error::ScrapeError;

// Bytes buffered before each write to disk
const CHUNK_SIZE: usize = 8192;

pub struct Downloader {
    client: Client,
    config: Config,
}

impl Downloader {
    pub fn new(client: Client, config: Config) -> Self {
        Downloader { client, config }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // Runs one task to completion: skip, success, or failure after retries
    pub async fn download(&self, task: DownloadTask) -> DownloadOutcome {
        let DownloadTask { url, kind } = task;
        let filename = derive_filename(&url);
        let destination = self.config.dir_for(kind).join(&filename);
        let max_attempts = self.config.retry_limit.saturating_add(1);

        let mut attempts: u32 = 0;
        let status = loop {
            if file_exists(&destination).await {
                debug!(url = %url, path = %destination.display(), "Already on disk");
                break DownloadStatus::SkippedExisting;
            }

            attempts += 1;
            match self.attempt(&url, &destination).await {
                Ok(bytes) => {
                    debug!(url = %url, bytes, attempts, "Downloaded");
                    break DownloadStatus::Succeeded { bytes };
                }
                Err(e) => {
                    debug!(
                        url = %url,
                        attempt = attempts,
                        max_attempts,
                        error = %e,
                        "Download attempt failed"
                    );
                    if attempts >= max_attempts {
                        break DownloadStatus::FailedAfterRetries {
                            cause: e.to_string(),
                        };
                    }
                }
            }
        };

        DownloadOutcome {
            url,
            kind,
            filename,
            attempts,
            status,
        }
    }

    // One GET, streamed to a .part file and renamed into place on success
    async fn attempt(&self, url: &str, destination: &Path) -> Result<u64, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScrapeError::from_request(url, &e))?;

        let partial = partial_path(destination);
        let result = write_body(url, response, &partial).await;

        match result {
            Ok(bytes) => {
                tokio::fs::rename(&partial, destination)
                    .await
                    .map_err(|e| io_failure(url, destination, e))?;
                Ok(bytes)
            }
            Err(e) => {
                // only ever our own .part file, never the destination
                let _ = tokio::fs::remove_file(&partial).await;
                Err(e)
            }
        }
    }
}

async fn write_body(
    url: &str,
    response: reqwest::Response,
    partial: &Path,
) -> Result<u64, ScrapeError> {
    let file = File::create(partial)
        .await
        .map_err(|e| io_failure(url, partial, e))?;
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ScrapeError::from_request(url, &e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| io_failure(url, partial, e))?;
        written += chunk.len() as u64;
    }

    writer.flush().await.map_err(|e| io_failure(url, partial, e))?;
    Ok(written)
}

fn io_failure(url: &str, path: &Path, error: std::io::Error) -> ScrapeError {
    ScrapeError::DownloadFailure {
        url: url.to_string(),
        reason: format!("I/O error at {}: {}", path.display(), error),
    }
}

async fn file_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    destination.with_file_name(name)
}

// Picks the local filename for a URL
//
// Examples:
//   http://h.onion/v/clip.mp4?t=1  -> "clip.mp4"
//   http://h.onion/                -> "file_<16 hex chars of sha256(url)>"
//
// The hash is stable, so a re-run finds the same file and skips it.
pub fn derive_filename(url: &str) -> String {
    let segment = Url::parse(url).ok().and_then(|parsed| {
        parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(str::to_string)
    });

    match segment {
        Some(name) if is_usable_name(&name) => name,
        _ => {
            let digest = format!("{:x}", Sha256::digest(url.as_bytes()));
            format!("file_{}", &digest[..16])
        }
    }
}

fn is_usable_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
