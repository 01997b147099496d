//! Append tags to the document head with a full parse/serialize cycle

use kuchiki::traits::TendrilSink;

use crate::error::{MirrorError, MirrorResult};

/// Append a robots meta tag and a stylesheet link to `<head>`
///
/// The HTML5 parser synthesizes `<html>`, `<head>`, and `<body>` when the
/// input omits them, so the output is always a complete document.
pub fn inject_head_tags(html: &str, robots_directive: &str, stylesheet_href: &str) -> MirrorResult<String> {
    let document = kuchiki::parse_html().one(html);

    let head = document
        .select_first("head")
        .map_err(|()| MirrorError::Parse("document has no <head> element".to_string()))?;

    let snippet = format!(
        r#"<meta name="robots" content="{}"><link rel="stylesheet" href="{}">"#,
        html_escape::encode_double_quoted_attribute(robots_directive),
        html_escape::encode_double_quoted_attribute(stylesheet_href),
    );
    let fragment = kuchiki::parse_html().one(snippet);

    // Collect before moving: detach() invalidates the selection iterator
    let injected: Vec<_> = fragment
        .select("head > meta, head > link")
        .map_err(|()| MirrorError::Parse("Invalid injection selector".to_string()))?
        .collect();

    for element in injected {
        let node = element.as_node().clone();
        node.detach();
        head.as_node().append(node);
    }

    let mut output = Vec::new();
    document
        .serialize(&mut output)
        .map_err(|e| MirrorError::Parse(format!("Failed to serialize document: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| MirrorError::Parse(format!("Serialized document is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_to_existing_head() {
        let html = r#"<!DOCTYPE html>
<html><head><title>About</title></head><body><h1>About</h1></body></html>"#;

        let result = inject_head_tags(html, "noindex, nofollow", "/css/custom.css").unwrap();

        let title = result.find("<title>").unwrap();
        let meta = result
            .find(r#"<meta content="noindex, nofollow" name="robots">"#)
            .or_else(|| result.find(r#"<meta name="robots" content="noindex, nofollow">"#))
            .expect("robots meta missing");
        let head_end = result.find("</head>").unwrap();
        assert!(title < meta && meta < head_end);
        assert!(result.contains("/css/custom.css"));
        assert!(result.contains("<h1>About</h1>"));
        assert!(result.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn synthesizes_head_when_missing() {
        let result = inject_head_tags("<p>bare</p>", "noindex", "/a.css").unwrap();
        assert!(result.contains("<head>"));
        assert!(result.contains("robots"));
        assert!(result.contains("<p>bare</p>"));
    }

    #[test]
    fn escapes_attribute_values() {
        let result = inject_head_tags("<html></html>", "x\"y", "/a.css").unwrap();
        assert!(!result.contains("x\"y"));
    }
}
