// src/media/extract.rs
// =============================================================================
// This module pulls media links out of an HTML page.
//
// We use the `scraper` crate to walk the DOM with one CSS selector that
// matches the three places media is linked from:
// - <a href="...">      hyperlinks (videos and images)
// - <img src="...">     inline images (images only)
// - <source src="...">  <video>/<audio> sources (videos only)
//
// Every reference is resolved against the page URL with the `url` crate
// and then sorted into a MediaKind by the suffix of its path.
// =============================================================================

use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use super::catalog::{MediaCatalog, MediaKind};

// One selector so that matches come back in document order
const MEDIA_SELECTOR: &str = "a[href], img[src], source[src]";

// Extracts all media links from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base_url: the URL of the page (for resolving relative links)
//
// Example:
//   html = "<a href='vid1.mp4'>" with base_url = "http://x.onion/page"
//   result: Mp4 -> ["http://x.onion/vid1.mp4"]
pub fn extract_media_links(html: &str, base_url: &str) -> MediaCatalog {
    let mut catalog = MediaCatalog::new();

    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            warn!(base_url, error = %e, "Invalid base URL, cannot resolve media links");
            return catalog;
        }
    };

    let selector = match Selector::parse(MEDIA_SELECTOR) {
        Ok(selector) => selector,
        Err(e) => {
            warn!(error = ?e, "Media selector failed to parse");
            return catalog;
        }
    };

    let document = Html::parse_document(html);

    for element in document.select(&selector) {
        let tag = element.value().name();
        let reference = match tag {
            "a" => element.value().attr("href"),
            _ => element.value().attr("src"),
        };
        let Some(reference) = reference else {
            continue;
        };

        let Some(absolute) = resolve_url(&base, reference) else {
            debug!(reference, "Skipping unresolvable reference");
            continue;
        };

        let Some(kind) = MediaKind::from_suffix(absolute.path()) else {
            continue;
        };

        if accepts(tag, kind) {
            catalog.push(kind, absolute.to_string());
        }
    }

    debug!(
        base_url,
        videos = catalog.count(MediaKind::Mp4),
        jpgs = catalog.count(MediaKind::Jpg),
        pngs = catalog.count(MediaKind::Png),
        "Extracted media links"
    );

    catalog
}

// Which tag may contribute which kind:
//   <a>      -> everything
//   <img>    -> images only (an <img src="x.mp4"> is not a video link)
//   <source> -> videos only
fn accepts(tag: &str, kind: MediaKind) -> bool {
    match tag {
        "a" => true,
        "img" => !kind.is_video(),
        "source" => kind.is_video(),
        _ => false,
    }
}

// Resolves a possibly-relative reference to an absolute HTTP(S) URL
//
// Examples (base = "http://x.onion/gallery/page"):
//   "a.jpg"        -> http://x.onion/gallery/a.jpg
//   "/v/clip.mp4"  -> http://x.onion/v/clip.mp4
//   "mailto:..."   -> None (not HTTP)
fn resolve_url(base: &Url, reference: &str) -> Option<Url> {
    let url = base.join(reference.trim()).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is let-else?
//    - `let Some(x) = value else { continue; };` binds x or leaves the loop
//      iteration early
//    - It keeps the happy path unindented
//
// 2. What does Url::join do?
//    - Resolves a reference the way a browser does
//    - "a.jpg" against "http://h/dir/page" becomes "http://h/dir/a.jpg"
//    - An absolute reference replaces the base entirely
//
// 3. Why look at url.path() and not the raw attribute?
//    - The path has no query string or fragment, so "cat.png?size=2"
//      still ends in ".png"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str =
        "http://abcdefghijklmnopqrstuvwxyz234567abcdefghijklmnopqrstuvwx.onion/page";

    fn onion(path: &str) -> String {
        format!(
            "http://abcdefghijklmnopqrstuvwxyz234567abcdefghijklmnopqrstuvwx.onion{}",
            path
        )
    }

    #[test]
    fn test_relative_links_resolve_into_kinds() {
        let html = r#"
            <a href="vid1.mp4">Video</a>
            <img src="a.jpg">
            <video><source src="clip.mp4" type="video/mp4"></video>
        "#;
        let catalog = extract_media_links(html, BASE);
        assert_eq!(
            catalog.links(MediaKind::Mp4),
            [onion("/vid1.mp4"), onion("/clip.mp4")]
        );
        assert_eq!(catalog.links(MediaKind::Jpg), [onion("/a.jpg")]);
        assert!(catalog.links(MediaKind::Png).is_empty());
    }

    #[test]
    fn test_img_with_video_suffix_is_ignored() {
        let html = r#"<img src="not-a-video.mp4">"#;
        let catalog = extract_media_links(html, BASE);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_source_with_image_suffix_is_ignored() {
        let html = r#"<picture><source src="poster.png"></picture>"#;
        let catalog = extract_media_links(html, BASE);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_hyperlink_to_image_is_collected() {
        let html = r#"<a href="/full/photo.JPG">full size</a><a href="thumb.png">t</a>"#;
        let catalog = extract_media_links(html, BASE);
        assert_eq!(catalog.links(MediaKind::Jpg), [onion("/full/photo.JPG")]);
        assert_eq!(catalog.links(MediaKind::Png), [onion("/thumb.png")]);
    }

    #[test]
    fn test_unrecognized_and_non_http_references_are_dropped() {
        let html = r##"
            <a href="notes.txt">notes</a>
            <a href="mailto:someone@example.com">mail</a>
            <a href="javascript:void(0)">js</a>
            <img src="anim.gif">
            <a href="#top">top</a>
        "##;
        let catalog = extract_media_links(html, BASE);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_query_string_does_not_hide_suffix() {
        let html = r#"<a href="img/cat.png?size=large">cat</a>"#;
        let catalog = extract_media_links(html, BASE);
        assert_eq!(
            catalog.links(MediaKind::Png),
            [onion("/img/cat.png?size=large")]
        );
    }

    #[test]
    fn test_document_order_is_kept_within_kind() {
        let html = r#"
            <source src="b.mp4">
            <a href="a.mp4">a</a>
            <img src="2.jpg">
            <a href="1.jpg">1</a>
        "#;
        let catalog = extract_media_links(html, BASE);
        assert_eq!(catalog.links(MediaKind::Mp4), [onion("/b.mp4"), onion("/a.mp4")]);
        assert_eq!(catalog.links(MediaKind::Jpg), [onion("/2.jpg"), onion("/1.jpg")]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let html = r#"
            <a href="x.mp4">x</a><img src="y.png"><a href="y.png">again</a>
            <source src="z.mp4"><img src="w.jpg">
        "#;
        let first = extract_media_links(html, BASE);
        let second = extract_media_links(html, BASE);
        assert_eq!(first, second);
        assert_eq!(first.count(MediaKind::Png), 2);
    }

    #[test]
    fn test_invalid_base_yields_empty_catalog() {
        let catalog = extract_media_links(r#"<a href="a.mp4">a</a>"#, "not a url");
        assert!(catalog.is_empty());
    }
}
