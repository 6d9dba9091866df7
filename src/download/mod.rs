// src/download/mod.rs
// =============================================================================
// Downloading media files.
//
// Submodules:
// - outcome: DownloadTask, DownloadOutcome and the run Summary
// - file: one download with existence-skip and bounded retry
// - dispatch: runs many downloads on a bounded pool
// =============================================================================

mod dispatch;
mod file;
pub mod outcome;

pub use dispatch::{dispatch, run_tasks};
pub use file::Downloader;
pub use outcome::{DownloadOutcome, DownloadTask, Summary};
