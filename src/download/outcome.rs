// src/download/outcome.rs
// =============================================================================
// The unit of work handed to the pool and the result it ends with.
// =============================================================================

use serde::Serialize;

use crate::media::MediaKind;

/// One media URL waiting to be downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub url: String,
    pub kind: MediaKind,
}

impl DownloadTask {
    pub fn new(url: impl Into<String>, kind: MediaKind) -> Self {
        DownloadTask {
            url: url.into(),
            kind,
        }
    }
}

/// How a download ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DownloadStatus {
    /// The file was already on disk; nothing was requested
    SkippedExisting,
    /// The file was written
    Succeeded { bytes: u64 },
    /// Every attempt failed; holds the cause of the last one
    FailedAfterRetries { cause: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadOutcome {
    pub url: String,
    pub kind: MediaKind,
    pub filename: String,
    /// Number of network attempts made (0 for a skip on the first check)
    pub attempts: u32,
    #[serde(flatten)]
    pub status: DownloadStatus,
}

impl DownloadOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, DownloadStatus::FailedAfterRetries { .. })
    }

    /// The line printed for this task once it finishes
    pub fn status_line(&self) -> String {
        match &self.status {
            DownloadStatus::SkippedExisting => {
                format!("[✓] Skipped ({} exists): {}", self.kind, self.filename)
            }
            DownloadStatus::Succeeded { .. } => {
                format!("[✔] Downloaded {}: {}", self.kind, self.filename)
            }
            DownloadStatus::FailedAfterRetries { cause } => {
                format!("[✘] Failed ({}): {} - {}", self.kind, self.url, cause)
            }
        }
    }
}

/// Totals printed at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub skipped: usize,
    pub downloaded: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[DownloadOutcome]) -> Self {
        let mut summary = Summary::default();
        for outcome in outcomes {
            match outcome.status {
                DownloadStatus::SkippedExisting => summary.skipped += 1,
                DownloadStatus::Succeeded { .. } => summary.downloaded += 1,
                DownloadStatus::FailedAfterRetries { .. } => summary.failed += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.skipped + self.downloaded + self.failed
    }
}
