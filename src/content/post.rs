//! Post model

use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::FrontMatter;

/// A document read from a collection directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// URL-friendly name, the file name without its extension
    pub slug: String,

    /// Parsed front-matter
    pub metadata: FrontMatter,

    /// Raw, unrendered body text
    pub body: String,

    /// File the post was read from
    #[serde(skip)]
    pub source: PathBuf,
}

impl Post {
    pub fn new(slug: String, metadata: FrontMatter, body: String, source: PathBuf) -> Self {
        Self {
            slug,
            metadata,
            body,
            source,
        }
    }

    /// Title from front-matter, falling back to the slug
    pub fn title(&self) -> &str {
        self.metadata.title.as_deref().unwrap_or(&self.slug)
    }

    pub fn published_at(&self) -> Option<&str> {
        self.metadata.published_at.as_deref()
    }

    pub fn published_date(&self) -> Option<NaiveDate> {
        self.metadata.published_date()
    }
}

/// Derive a slug from a file path by dropping the directory and extension
pub fn slug_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
