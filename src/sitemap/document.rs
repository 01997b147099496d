//! In-memory sitemap model and its mutations
//!
//! Entries are compared by exact `location` string equality only. No
//! trailing-slash or case normalization happens anywhere in this module.

use std::collections::HashSet;

/// One `<url>` entry of a sitemap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlEntry {
    /// Absolute URL from `<loc>`
    pub location: String,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<String>,
}

impl UrlEntry {
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }
}

/// Ordered list of sitemap entries plus the `<urlset>` root attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapDocument {
    /// Attributes of `<urlset>` in source order (`xmlns`, `xmlns:image`, ...)
    pub namespaces: Vec<(String, String)>,
    pub entries: Vec<UrlEntry>,
}

impl SitemapDocument {
    #[must_use]
    pub fn new(entries: Vec<UrlEntry>) -> Self {
        Self {
            namespaces: Vec::new(),
            entries,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry locations in document order
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.location.as_str())
    }

    #[must_use]
    pub fn contains(&self, location: &str) -> bool {
        self.locations().any(|existing| existing == location)
    }

    /// Replace the first occurrence of `from` with `to` in every location
    ///
    /// Later occurrences (a staging URL inside a query string) are kept.
    /// A location is skipped when `to` already appears before its first
    /// `from`, or at the same position when `to` extends `from`
    /// (`https://a.com` → `https://a.com.au`), so a second pass changes
    /// nothing. Returns the number of rewritten entries.
    pub fn rewrite_domain(&mut self, from: &str, to: &str) -> usize {
        if from.is_empty() || from == to {
            return 0;
        }
        let target_extends_source = to.starts_with(from);

        let mut rewritten = 0;
        for entry in &mut self.entries {
            let Some(first) = entry.location.find(from) else {
                continue;
            };
            let already_rewritten = entry.location.find(to).is_some_and(|position| {
                position < first || (position == first && target_extends_source)
            });
            if already_rewritten {
                continue;
            }
            entry.location = entry.location.replacen(from, to, 1);
            rewritten += 1;
        }
        rewritten
    }

    /// Append each candidate whose location is not already present
    ///
    /// Duplicates within `candidates` are appended once. Returns the
    /// locations that were added, in order.
    pub fn merge_if_absent<I, S>(&mut self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut known: HashSet<String> = self.locations().map(str::to_string).collect();
        let mut added = Vec::new();

        for candidate in candidates {
            let location = candidate.into();
            if known.insert(location.clone()) {
                self.entries.push(UrlEntry::new(location.clone()));
                added.push(location);
            }
        }
        added
    }
}

/// Rewrite a document by value; see [`SitemapDocument::rewrite_domain`]
#[must_use]
pub fn rewrite_domain(mut doc: SitemapDocument, from: &str, to: &str) -> SitemapDocument {
    doc.rewrite_domain(from, to);
    doc
}

/// Merge by value; see [`SitemapDocument::merge_if_absent`]
#[must_use]
pub fn merge_if_absent<I, S>(mut doc: SitemapDocument, candidates: I) -> SitemapDocument
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    doc.merge_if_absent(candidates);
    doc
}
