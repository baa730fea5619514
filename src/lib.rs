//! folio: content layer for a personal blog and portfolio site
//!
//! Posts and notes live as front-matter documents in flat directories.
//! This crate lists them as structured [`content::Post`] records and
//! derives the site's sitemap from them. Rendering is left to whatever
//! consumes the posts.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod sitemap;

use anyhow::Result;
use std::path::{Path, PathBuf};

use config::CollectionConfig;
use content::{Post, Registry};
use error::{RegistryError, SitemapError};
use sitemap::Sitemap;

/// A site rooted at one directory
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Open a site, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);
        Self {
            config,
            base_dir,
            public_dir,
        }
    }

    /// Registry over a collection's directory, honouring the configured extensions
    pub fn registry(&self, collection: &CollectionConfig) -> Registry {
        Registry::new(self.base_dir.join(&collection.dir))
            .with_extensions(self.config.extensions.iter().cloned())
    }

    /// Build the sitemap across every configured collection.
    ///
    /// Collections whose directory doesn't exist contribute nothing.
    pub fn sitemap(&self, today: chrono::NaiveDate) -> std::result::Result<Sitemap, SitemapError> {
        let mut loaded: Vec<(&CollectionConfig, Vec<Post>)> = Vec::new();

        for collection in &self.config.collections {
            match self.registry(collection).list_posts() {
                Ok(listing) => {
                    for failure in &listing.failures {
                        tracing::warn!("Left out of sitemap: {}", failure);
                    }
                    loaded.push((collection, listing.posts));
                }
                Err(RegistryError::DirectoryNotFound(dir)) => {
                    tracing::warn!(
                        "Collection '{}' has no directory at {:?}, skipping",
                        collection.name,
                        dir
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        let borrowed: Vec<(&CollectionConfig, &[Post])> = loaded
            .iter()
            .map(|(collection, posts)| (*collection, posts.as_slice()))
            .collect();
        Sitemap::build(&self.config, &borrowed, today)
    }
}
