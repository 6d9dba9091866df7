// src/media/catalog.rs
// =============================================================================
// The media kinds we know how to grab, and the per-page catalog of links.
//
// A MediaCatalog is built once per fetched page. Inside each kind the links
// keep document order; nothing is deduplicated, so a file linked twice is
// listed twice.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One of the recognized file kinds
///
/// The derive order (Mp4, Jpg, Png) is also the order tasks are submitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// MP4 video container
    Mp4,
    /// JPEG image
    Jpg,
    /// PNG image
    Png,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [MediaKind::Mp4, MediaKind::Jpg, MediaKind::Png];

    /// Short label used in status lines ("mp4", "jpg", "png")
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Mp4 => "mp4",
            MediaKind::Jpg => "jpg",
            MediaKind::Png => "png",
        }
    }

    /// File suffix including the dot
    pub fn suffix(self) -> &'static str {
        match self {
            MediaKind::Mp4 => ".mp4",
            MediaKind::Jpg => ".jpg",
            MediaKind::Png => ".png",
        }
    }

    pub fn is_video(self) -> bool {
        matches!(self, MediaKind::Mp4)
    }

    /// Matches a URL path (or any string) against the known suffixes,
    /// ignoring case.
    pub fn from_suffix(path: &str) -> Option<MediaKind> {
        let lower = path.to_ascii_lowercase();
        MediaKind::ALL
            .into_iter()
            .find(|kind| lower.ends_with(kind.suffix()))
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Absolute media URLs found on one page, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaCatalog {
    links: BTreeMap<MediaKind, Vec<String>>,
}

impl MediaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: MediaKind, url: String) {
        self.links.entry(kind).or_default().push(url);
    }

    /// Links of one kind, in document order
    pub fn links(&self, kind: MediaKind) -> &[String] {
        self.links.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, kind: MediaKind) -> usize {
        self.links(kind).len()
    }

    /// Total number of links across all kinds
    pub fn len(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the catalog, yielding (kind, url) pairs kind by kind
    pub fn into_entries(self) -> impl Iterator<Item = (MediaKind, String)> {
        self.links
            .into_iter()
            .flat_map(|(kind, urls)| urls.into_iter().map(move |url| (kind, url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_match_ignores_case() {
        assert_eq!(MediaKind::from_suffix("/a/CLIP.MP4"), Some(MediaKind::Mp4));
        assert_eq!(MediaKind::from_suffix("/photo.Jpg"), Some(MediaKind::Jpg));
        assert_eq!(MediaKind::from_suffix("/logo.png"), Some(MediaKind::Png));
        assert_eq!(MediaKind::from_suffix("/logo.gif"), None);
        assert_eq!(MediaKind::from_suffix("/mp4"), None);
    }

    #[test]
    fn test_entries_follow_kind_then_insertion_order() {
        let mut catalog = MediaCatalog::new();
        catalog.push(MediaKind::Png, "http://h/1.png".to_string());
        catalog.push(MediaKind::Mp4, "http://h/1.mp4".to_string());
        catalog.push(MediaKind::Mp4, "http://h/2.mp4".to_string());
        catalog.push(MediaKind::Jpg, "http://h/1.jpg".to_string());

        let entries: Vec<_> = catalog.into_entries().collect();
        assert_eq!(
            entries,
            vec![
                (MediaKind::Mp4, "http://h/1.mp4".to_string()),
                (MediaKind::Mp4, "http://h/2.mp4".to_string()),
                (MediaKind::Jpg, "http://h/1.jpg".to_string()),
                (MediaKind::Png, "http://h/1.png".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut catalog = MediaCatalog::new();
        catalog.push(MediaKind::Jpg, "http://h/a.jpg".to_string());
        catalog.push(MediaKind::Jpg, "http://h/a.jpg".to_string());
        assert_eq!(catalog.count(MediaKind::Jpg), 2);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.count(MediaKind::Png), 0);
    }
}
