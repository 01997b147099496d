//! Content Transformer: rewrite fetched markup before it is written to disk
//!
//! Two independent passes:
//! - platform marker stripping, skipped for pages containing a form since
//!   form submission depends on the markers
//! - head tag injection (robots meta and stylesheet link), which always
//!   re-parses and re-serializes the whole document

mod head_injection;
mod platform_attrs;

pub use head_injection::inject_head_tags;
pub use platform_attrs::{has_form, strip_platform_attrs};

use crate::error::MirrorResult;
use crate::utils::{DEFAULT_ROBOTS_DIRECTIVE, DEFAULT_STYLESHEET_HREF};

/// Switches for [`transform`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    pub strip_platform_attrs: bool,
    pub inject_tags: bool,
    pub robots_directive: String,
    pub stylesheet_href: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            strip_platform_attrs: true,
            inject_tags: false,
            robots_directive: DEFAULT_ROBOTS_DIRECTIVE.to_string(),
            stylesheet_href: DEFAULT_STYLESHEET_HREF.to_string(),
        }
    }
}

/// Apply the enabled passes to a raw page
pub fn transform(raw_html: &str, options: &TransformOptions) -> MirrorResult<String> {
    let mut html = if options.strip_platform_attrs && !has_form(raw_html) {
        strip_platform_attrs(raw_html)
    } else {
        raw_html.to_string()
    };

    if options.inject_tags {
        html = inject_head_tags(&html, &options.robots_directive, &options.stylesheet_href)?;
    }

    Ok(html)
}
