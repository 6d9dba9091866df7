// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and set up logging
// 2. Create the download folders
// 3. Get the target URL (argument or prompt) and validate it
// 4. Run the fetch -> extract -> download pipeline
// 5. Exit with a code (0 = all good, 1 = something failed, 2 = bad input)
// =============================================================================

mod cli;
mod config;
mod download;
mod error;
mod fetch;
mod media;
mod pipeline;
mod report;
mod target;

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use cli::Cli;
use config::Config;
use download::Downloader;
use report::Reporter;
use target::TargetAddress;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    debug!(?cli, "CLI arguments parsed");

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins over -v / -q. Logs go to stderr so stdout stays clean
// for status lines and --json output.
fn init_logging(cli: &Cli) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// Returns:
//   Ok(0) = every task was downloaded or skipped
//   Ok(1) = the page could not be fetched, or some download failed
//   Ok(2) = the address was not a valid .onion URL
async fn run(cli: Cli) -> Result<i32> {
    let config = Config::from(&cli);
    config.prepare_dirs()?;
    let reporter = Reporter::new(cli.json, io::stdout().is_terminal());

    let input = match &cli.url {
        Some(url) => url.clone(),
        None => prompt_for_url()?,
    };

    let target = match TargetAddress::parse(&input) {
        Ok(target) => target,
        Err(e) => {
            reporter.failure(&e.to_string());
            reporter.finish_empty()?;
            return Ok(2);
        }
    };
    info!(target = %target, "Target accepted");

    let client = fetch::build_client(&config)?;
    let downloader = Downloader::new(client, config);

    let Some(outcomes) = pipeline::scrape_and_download(&target, &downloader, &reporter).await
    else {
        reporter.finish_empty()?;
        return Ok(1);
    };

    reporter.finish(&outcomes)?;

    if outcomes.iter().any(|o| o.is_failure()) {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn prompt_for_url() -> Result<String> {
    print!("Enter a .onion URL: ");
    io::stdout().flush().context("could not write prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("could not read URL from stdin")?;
    Ok(line.trim().to_string())
}
