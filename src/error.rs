//! Error types for content loading and sitemap generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a whole directory listing
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Document directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Failed to read document directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Duplicate slug '{slug}': {} and {}",
        .first.display(),
        .second.display()
    )]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// A failure confined to one document; the rest of the listing is still returned
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File name is not valid UTF-8: {}", .path.display())]
    InvalidFileName { path: PathBuf },

    #[error("Failed to enumerate entry in {}: {message}", .dir.display())]
    Entry { dir: PathBuf, message: String },
}

impl DocumentError {
    /// Path of the document (or directory) the failure refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            DocumentError::Read { path, .. } => path,
            DocumentError::InvalidFileName { path } => path,
            DocumentError::Entry { dir, .. } => dir,
        }
    }
}

/// Errors raised while building a sitemap
#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("Post '{slug}' is missing required field '{field}'")]
    MissingExpectedField { slug: String, field: &'static str },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
