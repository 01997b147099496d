//! Shared configuration constants for sitemirror
//!
//! Default values used by `MirrorConfig` and the pipeline so the same
//! names and paths are not spelled out in several places.

/// Default output directory for the mirrored tree
pub const DEFAULT_OUTPUT_DIR: &str = "website";

/// File name of the sitemap, both on the source site and in the output tree
pub const SITEMAP_FILE_NAME: &str = "sitemap.xml";

/// Access-control file kept across runs
pub const HTACCESS_FILE_NAME: &str = ".htaccess";

/// Path of the listing page whose cards link to resource pages
pub const DEFAULT_LISTING_PATH: &str = "/resources";

/// Flat output directory for resource pages
pub const DEFAULT_RESOURCES_DIR: &str = "resources";

/// Card link widgets on the listing page
pub const DEFAULT_CARD_LINK_SELECTOR: &str = ".layout394_card.is-link";

/// Page written at a directory root
pub const INDEX_FILE_NAME: &str = "index.html";

/// Extension given to every mirrored page
pub const HTML_EXTENSION: &str = "html";

/// Robots directive injected when tag injection is enabled
pub const DEFAULT_ROBOTS_DIRECTIVE: &str = "noindex, nofollow";

/// Stylesheet linked when tag injection is enabled
pub const DEFAULT_STYLESHEET_HREF: &str = "/css/custom.css";

/// Platform marker attributes injected by the site builder
///
/// Stripped from pages without forms; form submission relies on them.
pub const PLATFORM_MARKER_ATTRS: [&str; 3] = ["data-wf-domain", "data-wf-page", "data-wf-site"];

/// User agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("sitemirror/", env!("CARGO_PKG_VERSION"));
