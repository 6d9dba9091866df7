// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single command: give it a .onion URL (or leave it out and be
// prompted for one) and it downloads the media it finds there. Everything
// else is an option with a default that matches a stock local Tor daemon.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::config::{
    Config, DEFAULT_OUTPUT_DIR, DEFAULT_PROXY, DEFAULT_RETRY_LIMIT, DEFAULT_TIMEOUT_SECS,
    DEFAULT_WORKERS,
};

#[derive(Parser, Debug)]
#[command(
    name = "onion-media-grabber",
    version = "0.1.0",
    about = "Download .mp4, .jpg and .png files from a .onion page over Tor",
    long_about = "onion-media-grabber fetches one page through a local Tor SOCKS proxy, finds the \
                  videos and images it links to and downloads them concurrently. Files that are \
                  already on disk are skipped, so running it again only fetches what is missing."
)]
pub struct Cli {
    /// The .onion page or media file (prompted for when omitted)
    ///
    /// The http:// scheme is added when missing.
    pub url: Option<String>,

    /// SOCKS proxy every request goes through
    #[arg(long, default_value = DEFAULT_PROXY)]
    pub proxy: String,

    /// Root folder; videos/ and images/ are created inside it
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Number of concurrent downloads
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Retries after a failed download attempt
    #[arg(long, default_value_t = DEFAULT_RETRY_LIMIT)]
    pub retries: u32,

    /// Print the outcome of every download as JSON instead of status lines
    #[arg(long)]
    pub json: bool,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Log filter used when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Config {
            proxy: Some(cli.proxy.clone()),
            output_dir: cli.output_dir.clone(),
            workers: cli.workers.max(1),
            timeout: Duration::from_secs(cli.timeout),
            retry_limit: cli.retries,
            ..Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["onion-media-grabber"]);
        assert!(cli.url.is_none());
        let config = Config::from(&cli);
        let defaults = Config::default();
        assert_eq!(config.proxy, defaults.proxy);
        assert_eq!(config.output_dir, defaults.output_dir);
        assert_eq!(config.workers, defaults.workers);
        assert_eq!(config.timeout, defaults.timeout);
        assert_eq!(config.retry_limit, defaults.retry_limit);
    }

    #[test]
    fn test_options_override_config() {
        let cli = Cli::parse_from([
            "onion-media-grabber",
            "some.onion",
            "--proxy",
            "socks5h://10.0.0.2:9150",
            "-o",
            "/tmp/grab",
            "--workers",
            "4",
            "--timeout",
            "60",
            "--retries",
            "0",
        ]);
        assert_eq!(cli.url.as_deref(), Some("some.onion"));
        let config = Config::from(&cli);
        assert_eq!(config.proxy.as_deref(), Some("socks5h://10.0.0.2:9150"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/grab"));
        assert_eq!(config.workers, 4);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.retry_limit, 0);
    }

    #[test]
    fn test_log_level_flags() {
        assert_eq!(Cli::parse_from(["x"]).log_level(), "info");
        assert_eq!(Cli::parse_from(["x", "-v"]).log_level(), "debug");
        assert_eq!(Cli::parse_from(["x", "-vv"]).log_level(), "trace");
        assert_eq!(Cli::parse_from(["x", "-q"]).log_level(), "error");
    }
}
