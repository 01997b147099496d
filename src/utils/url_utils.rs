//! URL manipulation utilities.
//!
//! Helpers for joining site-relative links onto a domain and for splitting
//! URL paths into the segments that drive on-disk layout.

use url::Url;

use crate::error::{MirrorError, MirrorResult};

/// Join a site-relative link onto a domain prefix
///
/// Absolute http(s) links are returned unchanged. Relative links are
/// appended to `domain` with exactly one `/` between them.
#[must_use]
pub fn join_site_url(domain: &str, link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        return link.to_string();
    }

    let domain = domain.trim_end_matches('/');
    if link.starts_with('/') {
        format!("{domain}{link}")
    } else {
        format!("{domain}/{link}")
    }
}

/// Non-empty path segments of an absolute URL
pub fn url_path_segments(url: &str) -> MirrorResult<Vec<String>> {
    let parsed =
        Url::parse(url).map_err(|e| MirrorError::Parse(format!("Invalid URL '{url}': {e}")))?;

    Ok(path_segments(parsed.path()))
}

/// Non-empty segments of a `/`-separated path
#[must_use]
pub fn path_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Last non-empty segment of a link's path, ignoring query and fragment
#[must_use]
pub fn last_path_segment(link: &str) -> Option<String> {
    let path = link.split(['?', '#']).next().unwrap_or_default();
    path_segments(path).pop()
}

/// Check if a URL is an absolute http(s) URL
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
