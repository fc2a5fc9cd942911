//! Managed-file links in block text
//!
//! Block strings are scanned as raw text, not parsed as CommonMark: Roam
//! stores one inline fragment per block, so indentation never makes a code
//! block and URLs keep their exact spelling (entities such as `&amp;` are not
//! decoded).

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::constants as C;

/// `[label](https://host/rest)` with an optional leading `!`.
/// Labels may span lines; URLs run to the first `)`.
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(!?)\[([^\]]*)\]\((https://([^/\s)]+)/[^)]*)\)").unwrap());

/// A markdown image or link pointing at a managed file
#[derive(Debug, Clone, PartialEq)]
pub struct FileLink {
    /// Image alt text or link text (may be empty)
    pub label: String,
    /// `![..](..)` rather than `[..](..)`
    pub is_image: bool,
    /// Storage URL exactly as written in the block
    pub url: String,
    /// File name derived from the storage object path
    pub file_name: String,
}

/// Extract every image or link whose URL is served by `host`, in text order
pub fn find_managed_file_links(content: &str, host: &str) -> Vec<FileLink> {
    let mut links = Vec::new();

    for caps in LINK_RE.captures_iter(content) {
        let link_host = caps.get(4).map_or("", |m| m.as_str());
        if !link_host.eq_ignore_ascii_case(host) {
            continue;
        }

        let label = caps.get(2).map_or("", |m| m.as_str());
        let url = caps.get(3).map_or("", |m| m.as_str());
        let file_name = file_name_from_url(url).or_else(|| Some(label.trim().to_string()).filter(|s| !s.is_empty()));

        match file_name {
            Some(file_name) => links.push(FileLink {
                label: label.to_string(),
                is_image: caps.get(1).is_some_and(|m| !m.as_str().is_empty()),
                url: url.to_string(),
                file_name,
            }),
            None => tracing::debug!(url, "managed link without a file name"),
        }
    }

    links
}

/// Derive a file name from a storage URL
///
/// Storage URLs carry the object path percent-encoded after `/o/`, e.g.
/// `.../o/imgs%2Fapp%2FSCFH%2F-9owRBegJ8.jpeg.enc?alt=media` names
/// `-9owRBegJ8.jpeg.enc`. URLs without the marker fall back to the last
/// path segment.
pub fn file_name_from_url(url: &str) -> Option<String> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let encoded = match without_query.find(C::ASSET_OBJECT_MARKER) {
        Some(pos) => &without_query[pos + C::ASSET_OBJECT_MARKER.len()..],
        None => without_query.rsplit('/').next().unwrap_or(""),
    };

    let decoded = percent_decode_str(encoded).decode_utf8_lossy();
    let name = decoded.rsplit('/').next().unwrap_or("").trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
