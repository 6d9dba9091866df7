// src/report.rs
// =============================================================================
// Everything the user sees on stdout.
//
// In the normal mode every finished task prints its status line above an
// indicatif progress bar. With --json the lines and the bar are suppressed
// and the outcomes are printed as one JSON document at the end.
// =============================================================================

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::download::{DownloadOutcome, Summary};

#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    json: bool,
    show_bar: bool,
}

impl Reporter {
    pub fn new(json: bool, show_bar: bool) -> Self {
        Reporter { json, show_bar }
    }

    /// No bar and no JSON; status lines still go to stdout
    #[cfg(test)]
    pub fn plain() -> Self {
        Reporter::new(false, false)
    }

    /// "[i] ..." style information line
    pub fn note(&self, message: &str) {
        if !self.json {
            println!("[i] {}", message);
        }
    }

    /// "[!] ..." line for a failure that ends the run
    ///
    /// With --json it goes to stderr so stdout only ever holds JSON.
    pub fn failure(&self, message: &str) {
        if self.json {
            eprintln!("[!] {}", message);
        } else {
            println!("[!] {}", message);
        }
    }

    /// Ends a run that downloaded nothing: an empty JSON array with --json,
    /// nothing otherwise
    pub fn finish_empty(&self) -> Result<()> {
        if self.json {
            self.finish(&[])?;
        }
        Ok(())
    }

    /// Starts a progress display for `total` tasks
    pub fn start(&self, total: usize) -> Progress {
        let bar = if self.show_bar && !self.json {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::with_template(
                    "Downloading Media {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar.enable_steady_tick(Duration::from_millis(200));
            bar
        } else {
            ProgressBar::hidden()
        };

        Progress {
            bar,
            print_lines: !self.json,
        }
    }

    /// Prints the end-of-run summary or the JSON document
    pub fn finish(&self, outcomes: &[DownloadOutcome]) -> Result<()> {
        if self.json {
            println!("{}", render_json(outcomes)?);
            return Ok(());
        }

        let summary = Summary::from_outcomes(outcomes);
        println!();
        println!("Summary:");
        println!("   Downloaded: {}", summary.downloaded);
        println!("   Skipped:    {}", summary.skipped);
        println!("   Failed:     {}", summary.failed);
        println!("   Total:      {}", summary.total());
        Ok(())
    }
}

pub struct Progress {
    bar: ProgressBar,
    print_lines: bool,
}

impl Progress {
    pub fn report(&self, outcome: &DownloadOutcome) {
        if self.print_lines {
            let line = outcome.status_line();
            // a hidden bar swallows println, so print directly
            if self.bar.is_hidden() {
                println!("{}", line);
            } else {
                self.bar.println(line);
            }
        }
        self.bar.inc(1);
    }

    pub fn done(&self) {
        self.bar.finish_and_clear();
    }
}

fn render_json(outcomes: &[DownloadOutcome]) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}
