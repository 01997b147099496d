//! HTTP page fetching
//!
//! Thin wrapper over a shared `reqwest::Client`. Every sitemap, listing, and
//! page request goes through [`PageFetcher::fetch_text`], so transport
//! failures and non-success statuses surface uniformly as
//! `MirrorError::Fetch` carrying the URL.

use std::time::Duration;

use reqwest::Client;

use crate::config::MirrorConfig;
use crate::error::{MirrorError, MirrorResult};

/// Fetches page bodies as text
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Build a fetcher from the configured user agent and optional timeout
    pub fn from_config(config: &MirrorConfig) -> MirrorResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent());
        if let Some(secs) = config.request_timeout_secs() {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| MirrorError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// GET `url` and return the body as text
    ///
    /// # Errors
    ///
    /// `MirrorError::Fetch` on connection failure, non-2xx status, or an
    /// unreadable body.
    pub async fn fetch_text(&self, url: &str) -> MirrorResult<String> {
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| MirrorError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::fetch(url, format!("status {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| MirrorError::fetch(url, format!("failed to read body: {e}")))
    }
}
