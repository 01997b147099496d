//! Getter methods for `MirrorConfig`

use std::path::PathBuf;

use super::types::MirrorConfig;

impl MirrorConfig {
    #[must_use]
    pub fn processing_domain(&self) -> &str {
        &self.processing_domain
    }

    #[must_use]
    pub fn public_domain(&self) -> &str {
        &self.public_domain
    }

    #[must_use]
    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    #[must_use]
    pub fn sitemap_file_name(&self) -> &str {
        &self.sitemap_file_name
    }

    #[must_use]
    pub fn preserved_files(&self) -> &[String] {
        &self.preserved_files
    }

    #[must_use]
    pub fn listing_path(&self) -> &str {
        &self.listing_path
    }

    #[must_use]
    pub fn resources_dir(&self) -> &str {
        &self.resources_dir
    }

    #[must_use]
    pub fn card_link_selector(&self) -> &str {
        &self.card_link_selector
    }

    #[must_use]
    pub fn strip_platform_attrs(&self) -> bool {
        self.strip_platform_attrs
    }

    #[must_use]
    pub fn inject_tags(&self) -> bool {
        self.inject_tags
    }

    #[must_use]
    pub fn robots_directive(&self) -> &str {
        &self.robots_directive
    }

    #[must_use]
    pub fn stylesheet_href(&self) -> &str {
        &self.stylesheet_href
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn request_timeout_secs(&self) -> Option<u64> {
        self.request_timeout_secs
    }
}
