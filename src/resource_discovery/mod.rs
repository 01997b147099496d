//! Resource Link Discoverer: collect card links from the listing page

use scraper::{Html, Selector};

use crate::error::{MirrorError, MirrorResult};
use crate::http_fetch::PageFetcher;

/// Fetch `listing_url` and return the `href` of every element matching `selector`
///
/// Links come back exactly as written in the markup (normally site-relative),
/// in document order. No matches yields an empty vec.
///
/// # Errors
///
/// `MirrorError::Fetch` when the listing page cannot be retrieved,
/// `MirrorError::Parse` for an invalid selector.
pub async fn discover(
    fetcher: &PageFetcher,
    listing_url: &str,
    selector: &str,
) -> MirrorResult<Vec<String>> {
    let html = fetcher.fetch_text(listing_url).await?;
    let links = extract_links(&html, selector)?;
    log::info!("Found {} resource links on {listing_url}", links.len());
    Ok(links)
}

/// Extract `href` values of matching elements from an HTML document
///
/// Matching elements without an `href` attribute are skipped.
pub fn extract_links(html: &str, selector: &str) -> MirrorResult<Vec<String>> {
    let selector = Selector::parse(selector)
        .map_err(|e| MirrorError::Parse(format!("Invalid selector '{selector}': {e}")))?;

    let document = Html::parse_document(html);
    let links = document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
        .collect();

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::DEFAULT_CARD_LINK_SELECTOR;

    const LISTING: &str = r#"<html><body>
        <a class="layout394_card is-link" href="/resources/first">First</a>
        <a class="layout394_card" href="/resources/not-a-link-card">Nope</a>
        <div class="layout394_card is-link">no href</div>
        <a class="is-link layout394_card extra" href="/resources/second">Second</a>
    </body></html>"#;

    #[test]
    fn extracts_matching_hrefs_in_order() {
        let links = extract_links(LISTING, DEFAULT_CARD_LINK_SELECTOR).unwrap();
        assert_eq!(links, vec!["/resources/first", "/resources/second"]);
    }

    #[test]
    fn no_matches_is_empty() {
        let links = extract_links("<html><body></body></html>", DEFAULT_CARD_LINK_SELECTOR).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn invalid_selector_is_parse_error() {
        let err = extract_links(LISTING, "a[").unwrap_err();
        assert!(matches!(err, MirrorError::Parse(_)));
    }
}
