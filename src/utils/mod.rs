pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{
    is_valid_url, join_site_url, last_path_segment, path_segments, url_path_segments,
};
