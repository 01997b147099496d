//! Validation, file loading, and derived locations for `MirrorConfig`

use std::path::{Path, PathBuf};

use super::types::MirrorConfig;
use crate::content_transformer::TransformOptions;
use crate::error::{MirrorError, MirrorResult};
use crate::utils::{INDEX_FILE_NAME, HTML_EXTENSION, is_valid_url, join_site_url, last_path_segment};

impl MirrorConfig {
    /// Parse a TOML document into a validated configuration
    ///
    /// Fields missing from the document take their defaults; both domains
    /// must be present.
    ///
    /// # Example
    /// ```rust
    /// # use sitemirror::config::MirrorConfig;
    /// let config = MirrorConfig::from_toml_str(r#"
    ///     processing_domain = "https://agota-studio.webflow.io"
    ///     public_domain = "https://agota.studio"
    ///     inject_tags = true
    /// "#).unwrap();
    /// assert!(config.inject_tags());
    /// ```
    pub fn from_toml_str(source: &str) -> MirrorResult<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| MirrorError::Config(format!("Invalid config file: {e}")))?;
        config.validated()
    }

    /// Read and validate a TOML configuration file
    pub fn from_toml_file(path: &Path) -> MirrorResult<Self> {
        Self::read_toml_file(path)?.validated()
    }

    /// Read a TOML configuration file without validating it
    ///
    /// For callers that adjust the values first (command-line overrides)
    /// and validate through `into_builder().build()` afterwards.
    pub fn read_toml_file(path: &Path) -> MirrorResult<Self> {
        let source =
            std::fs::read_to_string(path).map_err(|e| MirrorError::filesystem(path, e))?;
        toml::from_str(&source).map_err(|e| {
            MirrorError::Config(format!("Invalid config file {}: {e}", path.display()))
        })
    }

    /// Check domains and path settings, trimming trailing slashes from domains
    ///
    /// Equal domains are accepted but logged, since the domain rewrite then
    /// has nothing to do.
    pub fn validated(mut self) -> MirrorResult<Self> {
        self.processing_domain = normalize_domain("processing_domain", &self.processing_domain)?;
        self.public_domain = normalize_domain("public_domain", &self.public_domain)?;

        if self.sitemap_file_name.trim().is_empty() {
            return Err(MirrorError::Config("sitemap_file_name is empty".to_string()));
        }
        if self.resources_dir.trim().is_empty() || self.resources_dir.contains(['/', '\\']) {
            return Err(MirrorError::Config(format!(
                "resources_dir must be a single directory name, got '{}'",
                self.resources_dir
            )));
        }
        if self.card_link_selector.trim().is_empty() {
            return Err(MirrorError::Config("card_link_selector is empty".to_string()));
        }
        if !self.listing_path.starts_with('/') {
            self.listing_path = format!("/{}", self.listing_path);
        }

        if self.domains_equal() {
            log::warn!(
                "processing_domain and public_domain are both {}; sitemap locations will not be rewritten",
                self.processing_domain
            );
        }

        Ok(self)
    }

    #[must_use]
    pub fn domains_equal(&self) -> bool {
        self.processing_domain == self.public_domain
    }

    /// Sitemap location on the processing domain
    #[must_use]
    pub fn sitemap_url(&self) -> String {
        join_site_url(&self.processing_domain, &self.sitemap_file_name)
    }

    /// Listing page location on the processing domain
    #[must_use]
    pub fn listing_url(&self) -> String {
        join_site_url(&self.processing_domain, &self.listing_path)
    }

    /// Persisted sitemap inside the output tree
    #[must_use]
    pub fn output_sitemap_path(&self) -> PathBuf {
        self.output_dir.join(&self.sitemap_file_name)
    }

    #[must_use]
    pub fn resources_dir_path(&self) -> PathBuf {
        self.output_dir.join(&self.resources_dir)
    }

    /// File the path mapper writes for the listing page itself
    ///
    /// For the default listing path `/resources` this is `resources.html`
    /// at the output root.
    #[must_use]
    pub fn listing_page_path(&self) -> PathBuf {
        let name = last_path_segment(&self.listing_path)
            .map(|segment| format!("{segment}.{HTML_EXTENSION}"))
            .unwrap_or_else(|| INDEX_FILE_NAME.to_string());
        let parent = self
            .listing_path
            .trim_matches('/')
            .rsplit_once('/')
            .map(|(dirs, _)| self.output_dir.join(dirs))
            .unwrap_or_else(|| self.output_dir.clone());
        parent.join(name)
    }

    /// Landing page the listing is relocated to
    #[must_use]
    pub fn relocated_listing_path(&self) -> PathBuf {
        self.resources_dir_path().join(INDEX_FILE_NAME)
    }

    /// Options for sitemap pages
    #[must_use]
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            strip_platform_attrs: self.strip_platform_attrs,
            inject_tags: self.inject_tags,
            robots_directive: self.robots_directive.clone(),
            stylesheet_href: self.stylesheet_href.clone(),
        }
    }
}

fn normalize_domain(field: &str, value: &str) -> MirrorResult<String> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(MirrorError::Config(format!("{field} is required")));
    }
    if !is_valid_url(trimmed) {
        return Err(MirrorError::Config(format!(
            "{field} must be an absolute http(s) URL, got '{value}'"
        )));
    }
    Ok(trimmed.to_string())
}
