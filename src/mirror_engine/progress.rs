//! Progress reporting abstraction for mirroring runs
//!
//! Defines the `ProgressReporter` trait for lifecycle event reporting
//! and provides a no-op and a log-backed implementation.

use std::fmt;
use std::path::Path;

use super::report::MirrorReport;
use crate::error::MirrorError;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MirrorStage {
    Reset,
    SitemapFetch,
    DomainRewrite,
    PageMirror,
    ResourceDiscovery,
    SitemapMerge,
    ResourceMirror,
    DomainFixup,
    Relocate,
}

impl MirrorStage {
    pub const ALL: [MirrorStage; 9] = [
        Self::Reset,
        Self::SitemapFetch,
        Self::DomainRewrite,
        Self::PageMirror,
        Self::ResourceDiscovery,
        Self::SitemapMerge,
        Self::ResourceMirror,
        Self::DomainFixup,
        Self::Relocate,
    ];

    /// 1-based position in the pipeline
    #[must_use]
    pub fn ordinal(self) -> usize {
        self as usize + 1
    }

    /// Whether a failure in this stage aborts the run
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::SitemapFetch | Self::DomainRewrite)
    }
}

impl fmt::Display for MirrorStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reset => "reset output folder",
            Self::SitemapFetch => "fetch sitemap",
            Self::DomainRewrite => "rewrite sitemap domain",
            Self::PageMirror => "mirror sitemap pages",
            Self::ResourceDiscovery => "discover resource links",
            Self::SitemapMerge => "merge resource links into sitemap",
            Self::ResourceMirror => "mirror resource pages",
            Self::DomainFixup => "fix sitemap domains",
            Self::Relocate => "relocate listing page",
        };
        f.write_str(name)
    }
}

/// Trait for reporting mirror progress at key lifecycle events
///
/// Implementations can send updates to channels, log to console, update UI, etc.
pub trait ProgressReporter: Send + Sync {
    /// Report that a pipeline stage has started
    fn report_stage(&self, stage: MirrorStage);

    /// Report that a page was written to disk
    fn report_page_saved(&self, url: &str, path: &Path);

    /// Report that a page could not be mirrored
    fn report_page_failed(&self, url: &str, error: &MirrorError);

    /// Report that the run reached its terminal state
    fn report_completed(&self, report: &MirrorReport);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_stage(&self, _stage: MirrorStage) {}

    #[inline(always)]
    fn report_page_saved(&self, _url: &str, _path: &Path) {}

    #[inline(always)]
    fn report_page_failed(&self, _url: &str, _error: &MirrorError) {}

    #[inline(always)]
    fn report_completed(&self, _report: &MirrorReport) {}
}

/// Progress reporter backed by the `log` facade
///
/// Stage transitions and the final summary go out at info level; per-page
/// events at debug, since the pipeline already logs their outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report_stage(&self, stage: MirrorStage) {
        log::info!(
            target: "sitemirror::progress",
            "[{}/{}] {stage}",
            stage.ordinal(),
            MirrorStage::ALL.len()
        );
    }

    fn report_page_saved(&self, url: &str, path: &Path) {
        log::debug!(target: "sitemirror::progress", "saved {url} -> {}", path.display());
    }

    fn report_page_failed(&self, url: &str, error: &MirrorError) {
        log::debug!(target: "sitemirror::progress", "failed {url}: {error}");
    }

    fn report_completed(&self, report: &MirrorReport) {
        log::info!(target: "sitemirror::progress", "{}", report.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered() {
        for (index, stage) in MirrorStage::ALL.iter().enumerate() {
            assert_eq!(stage.ordinal(), index + 1);
        }
        assert!(MirrorStage::SitemapFetch < MirrorStage::Relocate);
    }

    #[test]
    fn only_sitemap_acquisition_is_fatal() {
        let fatal: Vec<_> = MirrorStage::ALL
            .iter()
            .filter(|stage| stage.is_fatal())
            .collect();
        assert_eq!(
            fatal,
            vec![&MirrorStage::SitemapFetch, &MirrorStage::DomainRewrite]
        );
    }
}
