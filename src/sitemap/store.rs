//! Sitemap persistence with atomic writes
//!
//! Loads sitemaps over HTTP or from disk and saves them using the
//! write-to-temp-then-rename pattern so a crash never leaves a truncated
//! sitemap behind.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::codec::{parse_sitemap, render_sitemap};
use super::document::SitemapDocument;
use crate::error::{MirrorError, MirrorResult};
use crate::http_fetch::PageFetcher;

/// Loads and saves sitemap documents
pub struct SitemapStore;

impl SitemapStore {
    /// Fetch and parse the sitemap at `url`
    ///
    /// # Errors
    ///
    /// `MirrorError::Fetch` on transport failure, `MirrorError::Parse` on
    /// malformed XML.
    pub async fn load(fetcher: &PageFetcher, url: &str) -> MirrorResult<SitemapDocument> {
        let body = fetcher.fetch_text(url).await?;
        let doc = parse_sitemap(&body)?;
        log::debug!("Loaded {} sitemap entries from {url}", doc.len());
        Ok(doc)
    }

    /// Read and parse a persisted sitemap
    pub async fn load_file(path: &Path) -> MirrorResult<SitemapDocument> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|e| MirrorError::filesystem(path, e))?;
        parse_sitemap(&contents)
    }

    /// Serialize `doc` and atomically replace the file at `path`
    ///
    /// Uses atomic write pattern: write to temp file, sync, rename
    pub async fn save(doc: &SitemapDocument, path: &Path) -> MirrorResult<()> {
        let xml = render_sitemap(doc)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| MirrorError::filesystem(parent, e))?;
        }

        let temp_path = temp_path_for(path);

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| MirrorError::filesystem(&temp_path, e))?;

        file.write_all(xml.as_bytes())
            .await
            .map_err(|e| MirrorError::filesystem(&temp_path, e))?;

        // Sync to disk before rename
        file.sync_all()
            .await
            .map_err(|e| MirrorError::filesystem(&temp_path, e))?;
        drop(file);

        // Atomic rename (overwrites existing file)
        fs::rename(&temp_path, path)
            .await
            .map_err(|e| MirrorError::filesystem(path, e))?;

        log::debug!("Saved {} sitemap entries to {}", doc.len(), path.display());
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitemap::UrlEntry;
    use tempfile::TempDir;

    #[tokio::test]
    async fn save_overwrites_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        std::fs::write(&path, "stale").unwrap();

        let doc = SitemapDocument::new(vec![
            UrlEntry::new("https://agota.studio/"),
            UrlEntry::new("https://agota.studio/about"),
        ]);
        SitemapStore::save(&doc, &path).await.unwrap();

        let loaded = SitemapStore::load_file(&path).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(!dir.path().join("sitemap.xml.tmp").exists());
    }

    #[tokio::test]
    async fn save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("website").join("sitemap.xml");
        SitemapStore::save(&SitemapDocument::default(), &path)
            .await
            .unwrap();
        assert!(path.is_file());
    }

    #[tokio::test]
    async fn load_file_reports_missing_path() {
        let dir = TempDir::new().unwrap();
        let err = SitemapStore::load_file(&dir.path().join("nope.xml"))
            .await
            .unwrap_err();
        assert!(matches!(err, MirrorError::Filesystem { .. }));
    }

    #[test]
    fn temp_path_keeps_directory() {
        assert_eq!(
            temp_path_for(Path::new("website/sitemap.xml")),
            PathBuf::from("website/sitemap.xml.tmp")
        );
    }
}
