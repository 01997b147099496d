//! Type-safe builder for `MirrorConfig` using the typestate pattern
//!
//! Both domains are required; `build()` only exists once they are set.

use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::MirrorConfig;
use crate::error::MirrorResult;

// Type states for the builder
pub struct WithProcessingDomain;
pub struct Complete;

pub struct MirrorConfigBuilder<State = ()> {
    pub(crate) config: MirrorConfig,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for MirrorConfigBuilder<()> {
    fn default() -> Self {
        Self {
            config: MirrorConfig::default(),
            _phantom: PhantomData,
        }
    }
}

impl MirrorConfig {
    /// Create a builder for configuring a `MirrorConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> MirrorConfigBuilder<()> {
        MirrorConfigBuilder::default()
    }

    /// Reopen a configuration for adjustment; `build()` validates again
    #[must_use]
    pub fn into_builder(self) -> MirrorConfigBuilder<Complete> {
        MirrorConfigBuilder {
            config: self,
            _phantom: PhantomData,
        }
    }
}

impl MirrorConfigBuilder<()> {
    pub fn processing_domain(
        mut self,
        domain: impl Into<String>,
    ) -> MirrorConfigBuilder<WithProcessingDomain> {
        self.config.processing_domain = domain.into();
        MirrorConfigBuilder {
            config: self.config,
            _phantom: PhantomData,
        }
    }
}

impl MirrorConfigBuilder<WithProcessingDomain> {
    pub fn public_domain(mut self, domain: impl Into<String>) -> MirrorConfigBuilder<Complete> {
        self.config.public_domain = domain.into();
        MirrorConfigBuilder {
            config: self.config,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when all required fields are set
impl MirrorConfigBuilder<Complete> {
    /// Validate and normalize the configuration
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::Config` if either domain is not an absolute
    /// http(s) URL or a path setting is empty.
    pub fn build(self) -> MirrorResult<MirrorConfig> {
        self.config.validated()
    }

    #[must_use]
    pub fn replace_processing_domain(mut self, domain: impl Into<String>) -> Self {
        self.config.processing_domain = domain.into();
        self
    }

    #[must_use]
    pub fn replace_public_domain(mut self, domain: impl Into<String>) -> Self {
        self.config.public_domain = domain.into();
        self
    }
}

// Builder methods available at any state
impl<State> MirrorConfigBuilder<State> {
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn sitemap_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.sitemap_file_name = name.into();
        self
    }

    /// Replace the set of file names preserved by the reset step
    #[must_use]
    pub fn preserved_files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.preserved_files = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn listing_path(mut self, path: impl Into<String>) -> Self {
        self.config.listing_path = path.into();
        self
    }

    #[must_use]
    pub fn resources_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.resources_dir = dir.into();
        self
    }

    #[must_use]
    pub fn card_link_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.card_link_selector = selector.into();
        self
    }

    #[must_use]
    pub fn strip_platform_attrs(mut self, strip: bool) -> Self {
        self.config.strip_platform_attrs = strip;
        self
    }

    #[must_use]
    pub fn inject_tags(mut self, inject: bool) -> Self {
        self.config.inject_tags = inject;
        self
    }

    #[must_use]
    pub fn robots_directive(mut self, directive: impl Into<String>) -> Self {
        self.config.robots_directive = directive.into();
        self
    }

    #[must_use]
    pub fn stylesheet_href(mut self, href: impl Into<String>) -> Self {
        self.config.stylesheet_href = href.into();
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    #[must_use]
    pub fn request_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }
}
