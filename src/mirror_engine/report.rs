//! Summary of a completed mirroring run

use std::path::PathBuf;

use crate::folder_reset::ResetReport;

/// A page that could not be mirrored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub url: String,
    pub error: String,
}

/// What a run wrote and what it had to skip
///
/// A report exists only for runs that reached the terminal state; page
/// failures and best-effort stage failures are recorded here rather than
/// aborting the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorReport {
    pub reset: ResetReport,
    /// Entries in the final persisted sitemap
    pub sitemap_entries: usize,
    pub pages_saved: Vec<PathBuf>,
    pub page_failures: Vec<PageFailure>,
    /// Links found on the listing page, de-duplicated, in page order
    pub resource_links: Vec<String>,
    /// Locations appended to the sitemap by the merge stage
    pub sitemap_additions: Vec<String>,
    pub resources_saved: Vec<PathBuf>,
    pub resource_failures: Vec<PageFailure>,
    /// Whether the listing page now lives at `<resources>/index.html`
    pub relocated: bool,
    /// Non-fatal stage failures (discovery, merge, fixup, relocate)
    pub warnings: Vec<String>,
}

impl MirrorReport {
    /// Pages and resources that failed
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.page_failures.len() + self.resource_failures.len()
    }

    /// True when nothing was skipped
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0 && self.warnings.is_empty() && self.reset.is_clean()
    }

    /// One-line human-readable summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Mirrored {} pages and {} resources ({} failed), sitemap has {} entries ({} added), listing relocated: {}",
            self.pages_saved.len(),
            self.resources_saved.len(),
            self.failure_count(),
            self.sitemap_entries,
            self.sitemap_additions.len(),
            if self.relocated { "yes" } else { "no" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_both_failure_kinds() {
        let report = MirrorReport {
            page_failures: vec![PageFailure {
                url: "https://a.io/x".to_string(),
                error: "status 404".to_string(),
            }],
            resource_failures: vec![PageFailure {
                url: "https://a.io/resources/y".to_string(),
                error: "status 500".to_string(),
            }],
            ..MirrorReport::default()
        };
        assert_eq!(report.failure_count(), 2);
        assert!(!report.is_clean());
        assert!(report.summary().contains("(2 failed)"));
    }

    #[test]
    fn default_report_is_clean() {
        assert!(MirrorReport::default().is_clean());
    }
}
