//! Core configuration types for site mirroring
//!
//! This module contains the `MirrorConfig` struct, an immutable value
//! handed to the orchestrator at construction.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::{
    DEFAULT_CARD_LINK_SELECTOR, DEFAULT_LISTING_PATH, DEFAULT_OUTPUT_DIR, DEFAULT_RESOURCES_DIR,
    DEFAULT_ROBOTS_DIRECTIVE, DEFAULT_STYLESHEET_HREF, DEFAULT_USER_AGENT, HTACCESS_FILE_NAME,
    SITEMAP_FILE_NAME,
};

/// Main configuration struct for a mirroring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Staging domain pages are fetched from, without trailing slash.
    ///
    /// **INVARIANT:** absolute http(s) URL once built or validated.
    pub(crate) processing_domain: String,

    /// Public domain written into the persisted sitemap, without trailing slash.
    pub(crate) public_domain: String,

    /// Root of the mirrored tree
    pub(crate) output_dir: PathBuf,

    /// Sitemap file name, on the source site and in `output_dir`
    pub(crate) sitemap_file_name: String,

    /// File names the reset step never deletes, at any depth
    pub(crate) preserved_files: Vec<String>,

    /// Site-relative path of the resources listing page
    pub(crate) listing_path: String,

    /// Flat directory under `output_dir` holding resource pages
    pub(crate) resources_dir: String,

    /// CSS selector matching card links on the listing page
    pub(crate) card_link_selector: String,

    /// Strip platform marker attributes from pages without forms
    pub(crate) strip_platform_attrs: bool,

    /// Append robots meta and stylesheet link to every sitemap page
    pub(crate) inject_tags: bool,

    /// Content of the injected robots meta tag
    pub(crate) robots_directive: String,

    /// href of the injected stylesheet link
    pub(crate) stylesheet_href: String,

    pub(crate) user_agent: String,

    /// Per-request timeout. `None` keeps the HTTP client default.
    pub(crate) request_timeout_secs: Option<u64>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            processing_domain: String::new(),
            public_domain: String::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            sitemap_file_name: SITEMAP_FILE_NAME.to_string(),
            preserved_files: vec![
                HTACCESS_FILE_NAME.to_string(),
                SITEMAP_FILE_NAME.to_string(),
            ],
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            resources_dir: DEFAULT_RESOURCES_DIR.to_string(),
            card_link_selector: DEFAULT_CARD_LINK_SELECTOR.to_string(),
            strip_platform_attrs: true,
            inject_tags: false,
            robots_directive: DEFAULT_ROBOTS_DIRECTIVE.to_string(),
            stylesheet_href: DEFAULT_STYLESHEET_HREF.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: None,
        }
    }
}
