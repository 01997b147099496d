//! Error taxonomy for mirroring operations
//!
//! Every fallible operation in the crate returns [`MirrorResult`]. The
//! orchestrator decides per stage whether an error aborts the run or is
//! logged and absorbed.

use std::path::PathBuf;

/// Result type alias for mirroring operations
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Error types for mirroring operations
#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    /// Network failure or non-success HTTP status
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Malformed XML, unexpected document shape, or unparseable URL/selector
    #[error("Parse error: {0}")]
    Parse(String),

    /// Directory or file operation failure
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MirrorError {
    pub(crate) fn fetch(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from the network layer
    #[must_use]
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filesystem_error_names_path() {
        let err = MirrorError::filesystem(
            "/tmp/website/about.html",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/website/about.html"));
        assert!(msg.contains("denied"));
        assert!(!err.is_fetch());
    }

    #[test]
    fn fetch_error_names_url() {
        let err = MirrorError::fetch("https://example.com/x", "status 404 Not Found");
        assert!(err.is_fetch());
        assert_eq!(
            err.to_string(),
            "Failed to fetch https://example.com/x: status 404 Not Found"
        );
    }
}
