// src/target/address.rs
// =============================================================================
// This module turns what the user typed into a validated target address.
//
// Steps:
// 1. normalize: add "http://" when no scheme was given
// 2. validate:  strict v3 .onion pattern (56 chars of [a-z2-7] + ".onion")
// 3. classify:  direct media file or HTML page to scan
//
// The pattern match is deliberately narrow: we would rather reject an
// unusual but valid address than accept something that is not an onion.
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::ScrapeError;
use crate::media::MediaKind;

// http://, 56 base32 characters, ".onion", then nothing or a path/query
static ONION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^http://[a-z2-7]{56}\.onion(?:[/?].*)?$").expect("onion regex is valid")
});

/// A validated .onion address. Only obtainable through `TargetAddress::parse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetAddress {
    url: String,
}

/// What the target points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// The address itself is a media file; download it once
    Direct(MediaKind),
    /// The address is a page; fetch it and look for media links
    Page,
}

impl TargetAddress {
    /// Normalizes and validates user input in one go
    pub fn parse(input: &str) -> Result<Self, ScrapeError> {
        let normalized = normalize(input);
        validate(&normalized)?;
        Ok(TargetAddress { url: normalized })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn classify(&self) -> TargetKind {
        classify(&self.url)
    }
}

impl std::fmt::Display for TargetAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}

// Adds the plaintext scheme when the user left it out
//
// Examples:
//   "abc...xyz.onion/page"        -> "http://abc...xyz.onion/page"
//   "https://abc...xyz.onion"     -> unchanged
pub fn normalize(input: &str) -> String {
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("http://{}", input)
    }
}

// Checks an address against the strict onion pattern
pub fn validate(address: &str) -> Result<(), ScrapeError> {
    if ONION_PATTERN.is_match(address) {
        Ok(())
    } else {
        Err(ScrapeError::InvalidAddress(address.to_string()))
    }
}

// Decides between a direct media file and a page
//
// Only the path is looked at, so "clip.mp4?token=1" is still direct.
pub fn classify(address: &str) -> TargetKind {
    let path = match Url::parse(address) {
        Ok(url) => url.path().to_string(),
        Err(_) => address.to_string(),
    };

    match MediaKind::from_suffix(&path) {
        Some(kind) => TargetKind::Direct(kind),
        None => TargetKind::Page,
    }
}
