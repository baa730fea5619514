//! Content module - front-matter documents and the registry that lists them

mod frontmatter;
mod post;
pub mod registry;

pub use frontmatter::{FrontMatter, FrontMatterIssue, ParsedDocument, DELIMITER};
pub use post::{slug_from_path, Post};
pub use registry::{DocumentIssue, PostListing, Registry};
