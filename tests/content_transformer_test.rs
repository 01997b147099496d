//! Platform marker stripping and head injection on realistic pages

use sitemirror::{TransformOptions, transform};

mod common;
use common::create_test_html;

#[test]
fn test_default_options_strip_markers() {
    let page = create_test_html("About", "<h1>About</h1>");
    let output = transform(&page, &TransformOptions::default()).unwrap();

    assert!(!output.contains("data-wf-"));
    assert!(output.contains(r#"lang="en""#));
    assert!(output.contains("<h1>About</h1>"));
}

#[test]
fn test_pages_with_forms_keep_markers() {
    let page = create_test_html(
        "Contact",
        r#"<form action="/contact" method="post"><input name="email"></form>"#,
    );
    let output = transform(&page, &TransformOptions::default()).unwrap();

    assert_eq!(output, page);
    assert!(output.contains(r#"data-wf-site="64e1a""#));
}

#[test]
fn test_stripping_disabled_leaves_page_untouched() {
    let page = create_test_html("About", "<h1>About</h1>");
    let options = TransformOptions {
        strip_platform_attrs: false,
        ..TransformOptions::default()
    };

    assert_eq!(transform(&page, &options).unwrap(), page);
}

#[test]
fn test_injection_adds_robots_and_stylesheet() {
    let page = create_test_html("About", "<h1>About</h1>");
    let options = TransformOptions {
        inject_tags: true,
        ..TransformOptions::default()
    };
    let output = transform(&page, &options).unwrap();

    assert!(output.contains(r#"name="robots""#));
    assert!(output.contains(r#"content="noindex, nofollow""#));
    assert!(output.contains(r#"rel="stylesheet""#));
    assert!(output.contains(r#"href="/css/custom.css""#));
    assert!(!output.contains("data-wf-"));

    let head_end = output.find("</head>").unwrap();
    assert!(output.find("robots").unwrap() < head_end);
}

#[test]
fn test_injection_uses_configured_values() {
    let page = create_test_html("About", "");
    let options = TransformOptions {
        inject_tags: true,
        robots_directive: "noindex".to_string(),
        stylesheet_href: "/assets/site.css".to_string(),
        ..TransformOptions::default()
    };
    let output = transform(&page, &options).unwrap();

    assert!(output.contains(r#"content="noindex""#));
    assert!(output.contains(r#"href="/assets/site.css""#));
}
