// src/pipeline.rs
// =============================================================================
// The whole fetch -> extract -> dispatch -> download run for one target.
//
//   direct media URL:  one download task, no page fetch
//   page URL:          fetch HTML, extract media links, download them all
//
// Nothing here survives between runs; the catalog lives only as long as the
// call that built it.
// =============================================================================

use tracing::info;

use crate::download::{dispatch, run_tasks, DownloadOutcome, DownloadTask, Downloader};
use crate::fetch::fetch_page;
use crate::media::{extract_media_links, MediaKind};
use crate::report::Reporter;
use crate::target::{TargetAddress, TargetKind};

// Runs the pipeline for a validated target
//
// Returns None when the page could not be fetched (already reported);
// otherwise the outcome of every task in completion order.
pub async fn scrape_and_download(
    target: &TargetAddress,
    downloader: &Downloader,
    reporter: &Reporter,
) -> Option<Vec<DownloadOutcome>> {
    run_target(target.as_str(), target.classify(), downloader, reporter).await
}

// Sends a classified URL down the direct or the page route
pub async fn run_target(
    url: &str,
    kind: TargetKind,
    downloader: &Downloader,
    reporter: &Reporter,
) -> Option<Vec<DownloadOutcome>> {
    match kind {
        TargetKind::Direct(media) => {
            reporter.note(&format!("Direct file detected: {}", url));
            let tasks = vec![DownloadTask::new(url, media)];
            Some(download_tasks(tasks, downloader, reporter).await)
        }
        TargetKind::Page => scrape_page(url, downloader, reporter).await,
    }
}

// Fetches one page and downloads every media file it links to
pub async fn scrape_page(
    url: &str,
    downloader: &Downloader,
    reporter: &Reporter,
) -> Option<Vec<DownloadOutcome>> {
    let html = fetch_page(downloader.client(), url, reporter).await?;
    let catalog = extract_media_links(&html, url);

    reporter.note(&format!(
        "Found {} videos, {} JPGs, {} PNGs.",
        catalog.count(MediaKind::Mp4),
        catalog.count(MediaKind::Jpg),
        catalog.count(MediaKind::Png),
    ));
    info!(url, total = catalog.len(), "Media catalog built");

    if catalog.is_empty() {
        return Some(Vec::new());
    }

    let progress = reporter.start(catalog.len());
    let workers = downloader.config().workers;
    let outcomes = dispatch(catalog, downloader, workers, |outcome| progress.report(outcome)).await;
    progress.done();

    Some(outcomes)
}

async fn download_tasks(
    tasks: Vec<DownloadTask>,
    downloader: &Downloader,
    reporter: &Reporter,
) -> Vec<DownloadOutcome> {
    let progress = reporter.start(tasks.len());
    let workers = downloader.config().workers;
    let outcomes = run_tasks(tasks, downloader, workers, |outcome| progress.report(outcome)).await;
    progress.done();
    outcomes
}
