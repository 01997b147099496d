//! Platform marker attribute stripping
//!
//! Substitution is textual, not structural: any `data-wf-…="…"` run in the
//! raw markup is removed, including one that appears inside script or
//! text content. That over-match is accepted in exchange for leaving the
//! rest of the markup byte-for-byte intact.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

use crate::utils::PLATFORM_MARKER_ATTRS;

lazy_static! {
    static ref PLATFORM_ATTR_RE: Regex = {
        let names = PLATFORM_MARKER_ATTRS
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r#"(?:{names})="[^"]*""#))
            .expect("BUG: platform attribute pattern is invalid - this is a compile-time bug")
    };

    static ref FORM_SELECTOR: Selector = Selector::parse("form")
        .expect("BUG: hardcoded CSS selector 'form' is invalid - this is a compile-time bug");
}

/// Remove every platform marker attribute occurrence
#[must_use]
pub fn strip_platform_attrs(html: &str) -> String {
    PLATFORM_ATTR_RE.replace_all(html, "").into_owned()
}

/// Whether the page contains a `<form>` element
#[must_use]
pub fn has_form(html: &str) -> bool {
    let document = Html::parse_document(html);
    document.select(&FORM_SELECTOR).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_all_three_markers() {
        let html = r#"<html data-wf-domain="agota-studio.webflow.io" data-wf-page="64a1" data-wf-site="64a0"><body></body></html>"#;
        let stripped = strip_platform_attrs(html);
        assert_eq!(stripped, "<html   ><body></body></html>");
    }

    #[test]
    fn strips_repeated_occurrences() {
        let html = r#"<div data-wf-page="a"></div><div data-wf-page="b"></div>"#;
        assert!(!strip_platform_attrs(html).contains("data-wf-page"));
    }

    #[test]
    fn leaves_other_data_attributes() {
        let html = r#"<div data-wf-id="x" data-page="y"></div>"#;
        assert_eq!(strip_platform_attrs(html), html);
    }

    #[test]
    fn over_matches_text_content() {
        let html = r#"<p>use data-wf-site="abc" in your embed</p>"#;
        assert_eq!(strip_platform_attrs(html), "<p>use  in your embed</p>");
    }

    #[test]
    fn detects_form_elements() {
        assert!(has_form("<body><form action=\"/x\"></form></body>"));
        assert!(!has_form("<body><p>formal</p></body>"));
        assert!(!has_form("<body><!-- <form> --></body>"));
    }
}
