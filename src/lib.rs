pub mod config;
pub mod content_transformer;
pub mod error;
pub mod folder_reset;
pub mod http_fetch;
pub mod mirror_engine;
pub mod path_mapper;
pub mod resource_discovery;
pub mod sitemap;
pub mod utils;

pub use config::MirrorConfig;
pub use content_transformer::{TransformOptions, transform};
pub use error::{MirrorError, MirrorResult};
pub use folder_reset::{ResetReport, reset_folder};
pub use http_fetch::PageFetcher;
pub use mirror_engine::{
    LogProgress, MirrorReport, MirrorStage, NoOpProgress, PageFailure, ProgressReporter,
    SiteMirror,
};
pub use path_mapper::{MirrorTarget, map_url, resource_file_name};
pub use sitemap::{SitemapDocument, SitemapStore, UrlEntry};

/// Run the full pipeline for `config`, logging progress
pub async fn mirror(config: MirrorConfig) -> MirrorResult<MirrorReport> {
    let mirror = SiteMirror::with_progress(config, LogProgress)?;
    mirror.run().await
}
