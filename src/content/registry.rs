//! Document registry - lists the posts in one content directory

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::post::slug_from_path;
use super::{FrontMatter, FrontMatterIssue, Post};
use crate::error::{DocumentError, RegistryError};

/// A front-matter issue together with the file it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentIssue {
    pub path: PathBuf,
    pub issue: FrontMatterIssue,
}

/// Everything one scan of a directory produced
#[derive(Debug, Default)]
pub struct PostListing {
    /// Successfully read posts, newest first
    pub posts: Vec<Post>,
    /// Documents that could not be read
    pub failures: Vec<DocumentError>,
    /// Header lines that were skipped or overridden while parsing
    pub issues: Vec<DocumentIssue>,
}

/// Reads posts from a single, non-recursive document directory.
///
/// Nothing is cached: every call re-reads the directory.
#[derive(Debug, Clone)]
pub struct Registry {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl Registry {
    /// Create a registry over `dir` that accepts every file in it
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extensions: Vec::new(),
        }
    }

    /// Only accept files with one of these extensions (case-insensitive)
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read and parse every document in the directory.
    ///
    /// A missing directory fails the whole listing. Unreadable documents are
    /// collected in [`PostListing::failures`] and the scan carries on.
    pub fn list_posts(&self) -> Result<PostListing, RegistryError> {
        match fs::metadata(&self.dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(RegistryError::DirectoryNotFound(self.dir.clone())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RegistryError::DirectoryNotFound(self.dir.clone()));
            }
            Err(source) => {
                return Err(RegistryError::Io {
                    path: self.dir.clone(),
                    source,
                });
            }
        }

        let mut listing = PostListing::default();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let message = err.to_string();
                    let failed_path = err.path().map(Path::to_path_buf);
                    if failed_path.as_deref() == Some(self.dir.as_path()) {
                        let source = err
                            .into_io_error()
                            .unwrap_or_else(|| io::Error::other(message));
                        return Err(RegistryError::Io {
                            path: self.dir.clone(),
                            source,
                        });
                    }
                    tracing::warn!("Skipping entry in {:?}: {}", self.dir, message);
                    listing.failures.push(DocumentError::Entry {
                        dir: failed_path.unwrap_or_else(|| self.dir.clone()),
                        message,
                    });
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || is_hidden(path) || !self.accepts(path) {
                continue;
            }

            let Some(slug) = slug_from_path(path) else {
                tracing::warn!("Skipping {:?}: file name is not valid UTF-8", path);
                listing.failures.push(DocumentError::InvalidFileName {
                    path: path.to_path_buf(),
                });
                continue;
            };

            if let Some(first) = seen.insert(slug.clone(), path.to_path_buf()) {
                return Err(RegistryError::DuplicateSlug {
                    slug,
                    first,
                    second: path.to_path_buf(),
                });
            }

            match load_post(path, slug) {
                Ok((post, issues)) => {
                    for issue in issues {
                        tracing::warn!("{:?}: {}", path, issue);
                        listing.issues.push(DocumentIssue {
                            path: path.to_path_buf(),
                            issue,
                        });
                    }
                    tracing::debug!("Loaded post '{}' from {:?}", post.slug, path);
                    listing.posts.push(post);
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    listing.failures.push(e);
                }
            }
        }

        for post in &listing.posts {
            match post.published_at() {
                None => tracing::warn!(
                    "Post '{}' has no publishedAt; sorting it after dated posts",
                    post.slug
                ),
                Some(date) if post.published_date().is_none() => tracing::warn!(
                    "Post '{}' has unrecognised publishedAt '{}'; sorting it as text",
                    post.slug,
                    date
                ),
                Some(_) => {}
            }
        }
        sort_posts(&mut listing.posts);

        tracing::debug!(
            "Listed {} posts from {:?} ({} failed)",
            listing.posts.len(),
            self.dir,
            listing.failures.len()
        );

        Ok(listing)
    }

    /// Find a single post by slug
    pub fn get_post(&self, slug: &str) -> Result<Option<Post>, RegistryError> {
        let listing = self.list_posts()?;
        Ok(listing.posts.into_iter().find(|p| p.slug == slug))
    }

    fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_ascii_lowercase();
                self.extensions.iter().any(|allowed| *allowed == e)
            })
            .unwrap_or(false)
    }
}

/// Order posts newest first by `publishedAt`.
///
/// Dates compare as strings, which matches chronological order for ISO dates.
/// Undated posts go last. Ties fall back to slug order.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| match (a.published_at(), b.published_at()) {
        (Some(x), Some(y)) => y.cmp(x).then_with(|| a.slug.cmp(&b.slug)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.slug.cmp(&b.slug),
    });
}

fn load_post(path: &Path, slug: String) -> Result<(Post, Vec<FrontMatterIssue>), DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = FrontMatter::parse(&content);

    let post = Post::new(
        slug,
        doc.front_matter,
        doc.body.to_string(),
        path.to_path_buf(),
    );
    Ok((post, doc.issues))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
