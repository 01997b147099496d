//! Test utilities and helper functions for the sitemirror test suite

use anyhow::Result;
use mockito::{Mock, Server, ServerGuard};
use sitemirror::MirrorConfig;
use std::path::Path;
use tempfile::TempDir;

pub const PUBLIC_DOMAIN: &str = "https://example.com";

/// Creates a temporary directory for test output
#[allow(dead_code)]
pub fn create_test_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test HTML document carrying the platform markers
#[allow(dead_code)]
pub fn create_test_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html data-wf-domain="studio.webflow.io" data-wf-page="64f0c" data-wf-site="64e1a" lang="en">
<head>
    <meta charset="UTF-8">
    <title>{}</title>
</head>
<body>
    {}
</body>
</html>"#,
        html_escape::encode_text(title),
        body
    )
}

/// Builds a sitemap document listing `locations`
#[allow(dead_code)]
pub fn create_sitemap_xml(locations: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );
    for location in locations {
        xml.push_str(&format!("  <url>\n    <loc>{location}</loc>\n  </url>\n"));
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Listing page with one card link per `links` entry
#[allow(dead_code)]
pub fn create_listing_html(links: &[&str]) -> String {
    let cards: String = links
        .iter()
        .map(|link| format!(r#"<a class="layout394_card is-link" href="{link}">Card</a>"#))
        .collect();
    create_test_html("Resources", &cards)
}

/// Sets up a mock HTTP server
#[allow(dead_code)]
pub async fn setup_mock_server() -> ServerGuard {
    Server::new_async().await
}

/// Creates a mock endpoint that returns HTML content
#[allow(dead_code)]
pub async fn create_html_mock(server: &mut Server, path: &str, html: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(html)
        .create_async()
        .await
}

/// Creates a mock endpoint that returns sitemap XML
#[allow(dead_code)]
pub async fn create_xml_mock(server: &mut Server, path: &str, xml: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(xml)
        .create_async()
        .await
}

/// Creates a mock endpoint that returns an error
#[allow(dead_code)]
pub async fn create_error_mock(server: &mut Server, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_body("Error")
        .create_async()
        .await
}

/// Helper to create test URLs
#[allow(dead_code)]
pub fn test_url(server: &Server, path: &str) -> String {
    format!("{}{}", server.url(), path)
}

/// Configuration that mirrors `server` into `output_dir` as `PUBLIC_DOMAIN`
#[allow(dead_code)]
pub fn create_test_config(server: &Server, output_dir: &Path) -> MirrorConfig {
    MirrorConfig::builder()
        .processing_domain(server.url())
        .public_domain(PUBLIC_DOMAIN)
        .output_dir(output_dir)
        .build()
        .expect("Failed to create test config")
}

/// Verifies that a file exists and has content
#[allow(dead_code)]
pub async fn assert_file_exists_with_content(path: &Path) -> Result<String> {
    assert!(path.exists(), "File does not exist: {path:?}");
    let content = tokio::fs::read_to_string(path).await?;
    assert!(!content.is_empty(), "File is empty: {path:?}");
    Ok(content)
}

/// Creates files (and their parent folders) under `root`
#[allow(dead_code)]
pub async fn create_test_file_tree(root: &Path, files: &[&str]) -> Result<()> {
    for file_path in files {
        let full_path = root.join(file_path);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, format!("Test content for {file_path}")).await?;
    }
    Ok(())
}
