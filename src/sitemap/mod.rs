//! Sitemap Store: load, rewrite, merge, and persist sitemap documents

mod codec;
mod document;
mod store;

pub use codec::{SITEMAP_NAMESPACE, parse_sitemap, render_sitemap};
pub use document::{SitemapDocument, UrlEntry, merge_if_absent, rewrite_domain};
pub use store::SitemapStore;
