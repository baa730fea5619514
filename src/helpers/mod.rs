//! Small helpers shared by the sitemap and the CLI

mod url;

pub use url::*;
