// src/download/dispatch.rs
// =============================================================================
// Runs every download of a page on a bounded pool.
//
// The catalog is flattened into one task per link (duplicates included) and
// fed through `buffer_unordered(workers)`: at most `workers` downloads are in
// flight, and outcomes come back in the order they finish, not the order
// they were submitted.
// =============================================================================

use futures::stream::{self, StreamExt};
use tracing::debug;

use super::file::Downloader;
use super::outcome::{DownloadOutcome, DownloadTask};
use crate::media::MediaCatalog;

/// Turns a catalog into tasks: mp4 first, then jpg, then png
pub fn plan_tasks(catalog: MediaCatalog) -> Vec<DownloadTask> {
    catalog
        .into_entries()
        .map(|(kind, url)| DownloadTask::new(url, kind))
        .collect()
}

// Downloads everything in the catalog
//
// `on_outcome` is called for each task as soon as it finishes (used for the
// progress bar and status lines). The returned Vec is in completion order.
pub async fn dispatch<F>(
    catalog: MediaCatalog,
    downloader: &Downloader,
    workers: usize,
    on_outcome: F,
) -> Vec<DownloadOutcome>
where
    F: FnMut(&DownloadOutcome),
{
    run_tasks(plan_tasks(catalog), downloader, workers, on_outcome).await
}

pub async fn run_tasks<F>(
    tasks: Vec<DownloadTask>,
    downloader: &Downloader,
    workers: usize,
    mut on_outcome: F,
) -> Vec<DownloadOutcome>
where
    F: FnMut(&DownloadOutcome),
{
    let total = tasks.len();
    let workers = workers.max(1);
    debug!(tasks = total, workers, "Dispatching downloads");

    let mut pending = stream::iter(tasks)
        .map(|task| downloader.download(task))
        .buffer_unordered(workers);

    let mut outcomes = Vec::with_capacity(total);
    while let Some(outcome) = pending.next().await {
        on_outcome(&outcome);
        outcomes.push(outcome);
    }

    outcomes
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does buffer_unordered(N) do?
//    - It takes a stream of futures and polls at most N of them at a time
//    - Results are yielded as soon as any future finishes
//    - When one finishes, the next task from the stream is started
//
// 2. Why no tokio::spawn here?
//    - The futures borrow `downloader`, which spawn does not allow
//    - All downloads still overlap: while one waits on the network,
//      the others make progress on the same runtime
//
// 3. What is FnMut?
//    - A closure that may change the variables it captured
//    - The caller's closure can push into a Vec or bump a progress bar
// -----------------------------------------------------------------------------
