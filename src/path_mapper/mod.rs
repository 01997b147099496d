//! Path Mapper: derive where a URL's page lives in the mirrored tree
//!
//! `https://x/a/b/c` → `<root>/a/b/c.html`, `https://x/` → `<root>/index.html`.
//! When a directory `c` already exists next to where `c.html` would go, the
//! page is written as `index.html` inside that directory instead.

use std::path::{Path, PathBuf};

use crate::error::{MirrorError, MirrorResult};
use crate::utils::{HTML_EXTENSION, INDEX_FILE_NAME, last_path_segment, url_path_segments};

/// On-disk destination of a mirrored page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorTarget {
    pub folder: PathBuf,
    pub file_name: String,
}

impl MirrorTarget {
    /// Full path of the file to write
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.folder.join(&self.file_name)
    }
}

/// Map `url` under `root`, creating intermediate directories
///
/// Directory creation is idempotent, so repeated calls for the same URL
/// are safe.
///
/// # Errors
///
/// `MirrorError::Parse` for an unparseable URL, `MirrorError::Filesystem`
/// when a directory cannot be created.
pub async fn map_url(url: &str, root: &Path) -> MirrorResult<MirrorTarget> {
    let segments = url_path_segments(url)?;

    let Some((last, parents)) = segments.split_last() else {
        return Ok(MirrorTarget {
            folder: root.to_path_buf(),
            file_name: INDEX_FILE_NAME.to_string(),
        });
    };

    let folder = parents.iter().fold(root.to_path_buf(), |dir, segment| dir.join(segment));
    if folder != root {
        tokio::fs::create_dir_all(&folder)
            .await
            .map_err(|e| MirrorError::filesystem(&folder, e))?;
    }

    let same_named_dir = folder.join(last);
    if is_directory(&same_named_dir).await {
        log::debug!(
            "{} is a directory, writing {url} as its {INDEX_FILE_NAME}",
            same_named_dir.display()
        );
        return Ok(MirrorTarget {
            folder: same_named_dir,
            file_name: INDEX_FILE_NAME.to_string(),
        });
    }

    let file_name = format!("{last}.{HTML_EXTENSION}");
    Ok(MirrorTarget { folder, file_name })
}

/// File name for a page in the flat resources directory
///
/// Uses the link's last non-empty path segment; `None` when the link has
/// no path segments.
#[must_use]
pub fn resource_file_name(link: &str) -> Option<String> {
    last_path_segment(link).map(|segment| format!("{segment}.{HTML_EXTENSION}"))
}

async fn is_directory(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_names() {
        assert_eq!(
            resource_file_name("/resources/upvio-webflow-redevelopment"),
            Some("upvio-webflow-redevelopment.html".to_string())
        );
        assert_eq!(
            resource_file_name("/resources/case-study/"),
            Some("case-study.html".to_string())
        );
        assert_eq!(resource_file_name("/"), None);
    }

    #[test]
    fn target_path_joins_folder_and_file() {
        let target = MirrorTarget {
            folder: PathBuf::from("website/blog"),
            file_name: "post.html".to_string(),
        };
        assert_eq!(target.path(), PathBuf::from("website/blog/post.html"));
    }
}
