//! sitemirror: copy a site's pages to a local folder served from a public domain
//!
//! Usage: sitemirror --processing-domain https://studio.webflow.io --public-domain https://studio.com
//!    or: sitemirror --config mirror.toml

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sitemirror::{MirrorConfig, mirror};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// TOML configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Domain the site is currently served from
    #[arg(long)]
    processing_domain: Option<String>,

    /// Domain the mirrored site will be published under
    #[arg(long)]
    public_domain: Option<String>,

    /// Output folder
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Add robots meta and stylesheet link to every mirrored page
    #[arg(long, default_value_t = false)]
    inject_tags: bool,

    /// Keep data-wf-* platform markers in sitemap pages
    #[arg(long, default_value_t = false)]
    keep_platform_attrs: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn load_config(args: &Args) -> Result<MirrorConfig> {
    let base = match &args.config {
        Some(path) => MirrorConfig::read_toml_file(path)
            .with_context(|| format!("loading config file {}", path.display()))?,
        None => MirrorConfig::default(),
    };

    let mut builder = base.into_builder();
    if let Some(domain) = &args.processing_domain {
        builder = builder.replace_processing_domain(domain);
    }
    if let Some(domain) = &args.public_domain {
        builder = builder.replace_public_domain(domain);
    }
    if let Some(dir) = &args.output_dir {
        builder = builder.output_dir(dir);
    }
    if args.inject_tags {
        builder = builder.inject_tags(true);
    }
    if args.keep_platform_attrs {
        builder = builder.strip_platform_attrs(false);
    }
    if args.timeout_secs.is_some() {
        builder = builder.request_timeout_secs(args.timeout_secs);
    }

    builder.build().context("invalid configuration")
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("html5ever", log::LevelFilter::Off)
        .filter_module("selectors", log::LevelFilter::Off)
        .init();

    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Mirroring {} as {} into {}",
        config.processing_domain(),
        config.public_domain(),
        config.output_dir().display()
    );

    match mirror(config).await {
        Ok(report) => {
            if report.is_clean() {
                log::info!("Mirror completed");
            } else {
                log::warn!(
                    "Mirror completed with {} failed pages and {} warnings",
                    report.failure_count(),
                    report.warnings.len()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Mirror aborted: {e}");
            ExitCode::FAILURE
        }
    }
}
