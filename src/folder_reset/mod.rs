//! Folder Reset: clear the output tree while keeping excluded files
//!
//! Exclusions are bare file names matched at every depth. A directory that
//! still holds excluded content after its children were processed stays;
//! emptied directories are removed. Failures are logged per entry and the
//! walk continues, so a reset is best-effort rather than transactional.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use log::{debug, warn};
use tokio::fs;

/// Outcome of a reset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetReport {
    pub removed_files: usize,
    pub removed_dirs: usize,
    /// Excluded entries left in place
    pub preserved: Vec<PathBuf>,
    /// Paths that could not be inspected or removed, with the error text
    pub failures: Vec<(PathBuf, String)>,
}

impl ResetReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Recursively clear `root`, sparing names listed in `exclusions`
///
/// A missing `root` yields an empty report.
pub async fn reset_folder(root: &Path, exclusions: &[String]) -> ResetReport {
    let mut report = ResetReport::default();

    match fs::symlink_metadata(root).await {
        Ok(meta) if meta.is_dir() => {
            clear_dir(root, exclusions, &mut report).await;
        }
        Ok(_) => {
            warn!("{} is not a directory, leaving it alone", root.display());
            report
                .failures
                .push((root.to_path_buf(), "not a directory".to_string()));
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} does not exist yet, nothing to reset", root.display());
        }
        Err(e) => {
            warn!("Error clearing folder {}: {e}", root.display());
            report.failures.push((root.to_path_buf(), e.to_string()));
        }
    }

    report
}

type ClearFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

fn clear_dir<'a>(dir: &'a Path, exclusions: &'a [String], report: &'a mut ResetReport) -> ClearFuture<'a> {
    Box::pin(async move {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Error clearing folder {}: {e}", dir.display());
                report.failures.push((dir.to_path_buf(), e.to_string()));
                return;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!("Error reading entries of {}: {e}", dir.display());
                    report.failures.push((dir.to_path_buf(), e.to_string()));
                    break;
                }
            };

            let path = entry.path();
            let name = entry.file_name();
            if exclusions.iter().any(|excluded| name == excluded.as_str()) {
                debug!("Preserving {}", path.display());
                report.preserved.push(path);
                continue;
            }

            // file_type() does not follow symlinks
            let is_dir = match entry.file_type().await {
                Ok(file_type) => file_type.is_dir(),
                Err(e) => {
                    warn!("Error inspecting {}: {e}", path.display());
                    report.failures.push((path, e.to_string()));
                    continue;
                }
            };

            if is_dir {
                clear_dir(&path, exclusions, report).await;
                remove_if_empty(&path, report).await;
            } else if let Err(e) = fs::remove_file(&path).await {
                warn!("Error removing {}: {e}", path.display());
                report.failures.push((path, e.to_string()));
            } else {
                report.removed_files += 1;
            }
        }
    })
}

async fn remove_if_empty(dir: &Path, report: &mut ResetReport) {
    let is_empty = match fs::read_dir(dir).await {
        Ok(mut entries) => matches!(entries.next_entry().await, Ok(None)),
        Err(e) => {
            warn!("Error inspecting {}: {e}", dir.display());
            report.failures.push((dir.to_path_buf(), e.to_string()));
            return;
        }
    };

    if !is_empty {
        debug!("Keeping {} (holds preserved files)", dir.display());
        return;
    }

    match fs::remove_dir(dir).await {
        Ok(()) => report.removed_dirs += 1,
        Err(e) => {
            warn!("Error removing directory {}: {e}", dir.display());
            report.failures.push((dir.to_path_buf(), e.to_string()));
        }
    }
}
