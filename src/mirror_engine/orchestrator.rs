//! Nine-stage mirroring pipeline
//!
//! Stages run strictly in order. A stage failure aborts the run only when
//! [`MirrorStage::is_fatal`] says so (sitemap fetch, rewrite and first
//! persist); everything else is best-effort and recorded in the returned
//! [`MirrorReport`].

use std::path::{Path, PathBuf};

use log::{error, info, warn};

use super::progress::{MirrorStage, NoOpProgress, ProgressReporter};
use super::report::{MirrorReport, PageFailure};
use crate::config::MirrorConfig;
use crate::content_transformer::{strip_platform_attrs, transform};
use crate::error::{MirrorError, MirrorResult};
use crate::folder_reset::reset_folder;
use crate::http_fetch::PageFetcher;
use crate::path_mapper::{map_url, resource_file_name};
use crate::resource_discovery::discover;
use crate::sitemap::{SitemapDocument, SitemapStore, UrlEntry, rewrite_domain};
use crate::utils::join_site_url;

const TARGET: &str = "sitemirror::mirror";

/// Runs the mirroring pipeline for one configuration
pub struct SiteMirror<P: ProgressReporter = NoOpProgress> {
    config: MirrorConfig,
    fetcher: PageFetcher,
    progress: P,
}

impl SiteMirror<NoOpProgress> {
    /// Create a mirror with an HTTP client built from `config`
    ///
    /// # Errors
    ///
    /// `MirrorError::Config` when the HTTP client cannot be constructed.
    pub fn new(config: MirrorConfig) -> MirrorResult<Self> {
        Self::with_progress(config, NoOpProgress)
    }
}

impl<P: ProgressReporter> SiteMirror<P> {
    /// Create a mirror that reports lifecycle events to `progress`
    ///
    /// # Errors
    ///
    /// `MirrorError::Config` when the HTTP client cannot be constructed.
    pub fn with_progress(config: MirrorConfig, progress: P) -> MirrorResult<Self> {
        let fetcher = PageFetcher::from_config(&config)?;
        Ok(Self::with_fetcher(config, fetcher, progress))
    }

    pub fn with_fetcher(config: MirrorConfig, fetcher: PageFetcher, progress: P) -> Self {
        Self {
            config,
            fetcher,
            progress,
        }
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    /// Execute all stages in order
    ///
    /// # Errors
    ///
    /// Returns the underlying error when a fatal stage fails (see
    /// [`MirrorStage::is_fatal`]): fetching or parsing the sitemap, or
    /// persisting it after the domain rewrite. Failures in other stages are
    /// logged and collected in the report instead.
    pub async fn run(&self) -> MirrorResult<MirrorReport> {
        let mut report = MirrorReport::default();

        self.enter(MirrorStage::Reset);
        report.reset = reset_folder(self.config.output_dir(), self.config.preserved_files()).await;

        self.enter(MirrorStage::SitemapFetch);
        let outcome = SitemapStore::load(&self.fetcher, &self.config.sitemap_url()).await;
        let Some(fetched) = self.settle(MirrorStage::SitemapFetch, outcome, &mut report)? else {
            // Nothing to mirror without a sitemap
            return Ok(self.finish(report));
        };
        info!(target: TARGET, "Sitemap {} lists {} pages", self.config.sitemap_url(), fetched.len());

        self.enter(MirrorStage::DomainRewrite);
        // Pages are fetched from the locations as served, before the rewrite
        let page_urls: Vec<String> = fetched.locations().map(str::to_string).collect();
        let mut sitemap = rewrite_domain(
            fetched,
            self.config.processing_domain(),
            self.config.public_domain(),
        );
        let outcome = self.persist_rewritten(&sitemap).await;
        self.settle(MirrorStage::DomainRewrite, outcome, &mut report)?;

        self.enter(MirrorStage::PageMirror);
        self.mirror_pages(&page_urls, &mut report).await;

        self.enter(MirrorStage::ResourceDiscovery);
        let outcome = self.discover_resources().await;
        let links = self
            .settle(MirrorStage::ResourceDiscovery, outcome, &mut report)?
            .unwrap_or_default();
        report.resource_links = links.clone();

        self.enter(MirrorStage::SitemapMerge);
        let outcome = self.merge_resources(&mut sitemap, &links, &mut report).await;
        self.settle(MirrorStage::SitemapMerge, outcome, &mut report)?;

        self.enter(MirrorStage::ResourceMirror);
        self.mirror_resources(&links, &mut report).await;

        self.enter(MirrorStage::DomainFixup);
        let outcome = self.fix_sitemap_domains().await;
        report.sitemap_entries = self
            .settle(MirrorStage::DomainFixup, outcome, &mut report)?
            .unwrap_or(sitemap.len());

        self.enter(MirrorStage::Relocate);
        let outcome = self.relocate_listing().await;
        report.relocated = self
            .settle(MirrorStage::Relocate, outcome, &mut report)?
            .is_some();

        Ok(self.finish(report))
    }

    fn enter(&self, stage: MirrorStage) {
        log::debug!(target: TARGET, "Entering stage {}: {stage}", stage.ordinal());
        self.progress.report_stage(stage);
    }

    /// Apply the failure policy of `stage` to its outcome
    ///
    /// Fatal stages propagate the error. Other stages record it as a
    /// warning and yield `None` so the run can continue.
    fn settle<T>(
        &self,
        stage: MirrorStage,
        outcome: MirrorResult<T>,
        report: &mut MirrorReport,
    ) -> MirrorResult<Option<T>> {
        match outcome {
            Ok(value) => Ok(Some(value)),
            Err(e) if stage.is_fatal() => {
                error!(target: TARGET, "Stage {} ({stage}) failed, aborting: {e}", stage.ordinal());
                Err(e)
            }
            Err(e) => {
                error!(target: TARGET, "Stage {} ({stage}) failed: {e}", stage.ordinal());
                report.warnings.push(format!("{stage}: {e}"));
                Ok(None)
            }
        }
    }

    fn finish(&self, report: MirrorReport) -> MirrorReport {
        self.progress.report_completed(&report);
        report
    }

    async fn persist_rewritten(&self, sitemap: &SitemapDocument) -> MirrorResult<()> {
        let output_dir = self.config.output_dir();
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| MirrorError::filesystem(output_dir, e))?;
        let path = self.config.output_sitemap_path();
        SitemapStore::save(sitemap, &path).await?;
        info!(target: TARGET, "Sitemap saved to {}", path.display());
        Ok(())
    }

    async fn mirror_pages(&self, page_urls: &[String], report: &mut MirrorReport) {
        let options = self.config.transform_options();
        for url in page_urls {
            let outcome = async {
                let raw = self.fetcher.fetch_text(url).await?;
                let html = transform(&raw, &options)?;
                let target = map_url(url, self.config.output_dir()).await?;
                let path = target.path();
                write_page(&path, &html).await?;
                Ok::<_, MirrorError>(path)
            }
            .await;

            match outcome {
                Ok(path) => {
                    info!(target: TARGET, "Content for {url} fetched and saved to {}", path.display());
                    self.progress.report_page_saved(url, &path);
                    report.pages_saved.push(path);
                }
                Err(e) => {
                    error!(target: TARGET, "Error fetching {url}: {e}");
                    self.progress.report_page_failed(url, &e);
                    report.page_failures.push(PageFailure {
                        url: url.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    /// Listing page links, de-duplicated in page order
    async fn discover_resources(&self) -> MirrorResult<Vec<String>> {
        let found = discover(
            &self.fetcher,
            &self.config.listing_url(),
            self.config.card_link_selector(),
        )
        .await?;

        let mut links: Vec<String> = Vec::with_capacity(found.len());
        for link in found {
            if !links.contains(&link) {
                links.push(link);
            }
        }
        Ok(links)
    }

    async fn merge_resources(
        &self,
        sitemap: &mut SitemapDocument,
        links: &[String],
        report: &mut MirrorReport,
    ) -> MirrorResult<()> {
        let processing = self.config.processing_domain();
        // Candidates are built on the processing domain and brought to the
        // public domain before comparison, so existing entries match.
        let candidates = rewrite_domain(
            SitemapDocument::new(
                links
                    .iter()
                    .map(|link| UrlEntry::new(join_site_url(processing, link)))
                    .collect(),
            ),
            processing,
            self.config.public_domain(),
        );

        let added = sitemap.merge_if_absent(candidates.locations());
        info!(target: TARGET, "Added {} resource links to the sitemap", added.len());
        report.sitemap_additions = added;

        SitemapStore::save(sitemap, &self.config.output_sitemap_path()).await
    }

    async fn mirror_resources(&self, links: &[String], report: &mut MirrorReport) {
        if links.is_empty() {
            return;
        }

        let resources_dir = self.config.resources_dir_path();
        if let Err(e) = tokio::fs::create_dir_all(&resources_dir).await {
            let e = MirrorError::filesystem(&resources_dir, e);
            error!(target: TARGET, "Error creating resources directory: {e}");
            for link in links {
                report.resource_failures.push(PageFailure {
                    url: link.clone(),
                    error: e.to_string(),
                });
            }
            return;
        }

        for link in links {
            let url = join_site_url(self.config.processing_domain(), link);
            match self.mirror_resource(&url, link, &resources_dir).await {
                Ok(path) => {
                    info!(target: TARGET, "Resource {url} saved to {}", path.display());
                    self.progress.report_page_saved(&url, &path);
                    report.resources_saved.push(path);
                }
                Err(e) => {
                    error!(target: TARGET, "Error fetching or saving content from {url}: {e}");
                    self.progress.report_page_failed(&url, &e);
                    report.resource_failures.push(PageFailure {
                        url,
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    async fn mirror_resource(&self, url: &str, link: &str, resources_dir: &Path) -> MirrorResult<PathBuf> {
        let file_name = resource_file_name(link)
            .ok_or_else(|| MirrorError::Parse(format!("Resource link '{link}' has no path segment")))?;
        let raw = self.fetcher.fetch_text(url).await?;
        let html = strip_platform_attrs(&raw);
        let path = resources_dir.join(file_name);
        write_page(&path, &html).await?;
        Ok(path)
    }

    /// Reload the persisted sitemap, rewrite stragglers, save again
    ///
    /// Returns the final entry count.
    async fn fix_sitemap_domains(&self) -> MirrorResult<usize> {
        let path = self.config.output_sitemap_path();
        let mut doc = SitemapStore::load_file(&path).await?;
        let rewritten = doc.rewrite_domain(
            self.config.processing_domain(),
            self.config.public_domain(),
        );
        SitemapStore::save(&doc, &path).await?;
        info!(target: TARGET, "Sitemap domains fixed ({rewritten} locations rewritten)");
        Ok(doc.len())
    }

    /// Move the mirrored listing page to `<resources_dir>/index.html`
    ///
    /// When resource pages were mapped before the listing itself, the path
    /// mapper already wrote the listing there; that counts as relocated.
    async fn relocate_listing(&self) -> MirrorResult<()> {
        let source = self.config.listing_page_path();
        let destination = self.config.relocated_listing_path();

        if !tokio::fs::try_exists(&source).await.unwrap_or(false) {
            if tokio::fs::try_exists(&destination).await.unwrap_or(false) {
                log::debug!(
                    target: TARGET,
                    "Listing page already at {}",
                    destination.display()
                );
                return Ok(());
            }
            warn!(
                target: TARGET,
                "Listing page {} not found, nothing to relocate",
                source.display()
            );
            return Err(MirrorError::filesystem(
                &source,
                std::io::Error::new(std::io::ErrorKind::NotFound, "listing page was not mirrored"),
            ));
        }

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MirrorError::filesystem(parent, e))?;
        }
        tokio::fs::rename(&source, &destination)
            .await
            .map_err(|e| MirrorError::filesystem(&source, e))?;

        info!(
            target: TARGET,
            "Moved {} to {}",
            source.display(),
            destination.display()
        );
        Ok(())
    }
}

async fn write_page(path: &Path, html: &str) -> MirrorResult<()> {
    tokio::fs::write(path, html)
        .await
        .map_err(|e| MirrorError::filesystem(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mirror() -> SiteMirror {
        let config = MirrorConfig::builder()
            .processing_domain("https://studio.webflow.io")
            .public_domain("https://studio.com")
            .build()
            .unwrap();
        SiteMirror::new(config).unwrap()
    }

    #[test]
    fn fatal_stage_failure_propagates() {
        let mut report = MirrorReport::default();
        let outcome: MirrorResult<()> = Err(MirrorError::Parse("bad xml".to_string()));

        let err = mirror()
            .settle(MirrorStage::SitemapFetch, outcome, &mut report)
            .unwrap_err();

        assert!(matches!(err, MirrorError::Parse(_)));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn non_fatal_stage_failure_becomes_warning() {
        let mut report = MirrorReport::default();
        let outcome: MirrorResult<usize> = Err(MirrorError::Parse("bad xml".to_string()));

        let settled = mirror()
            .settle(MirrorStage::DomainFixup, outcome, &mut report)
            .unwrap();

        assert_eq!(settled, None);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("fix sitemap domains"));
    }

    #[test]
    fn success_passes_value_through() {
        let mut report = MirrorReport::default();
        let settled = mirror()
            .settle(MirrorStage::Relocate, Ok(3), &mut report)
            .unwrap();
        assert_eq!(settled, Some(3));
        assert!(report.is_clean());
    }
}
