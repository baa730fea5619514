//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    /// Base URL used for absolute links, e.g. `https://example.com`
    pub url: String,

    // Directory
    pub public_dir: String,

    /// File extensions treated as documents; empty accepts every file
    pub extensions: Vec<String>,

    /// Static routes listed in the sitemap ahead of the posts
    pub routes: Vec<String>,

    pub collections: Vec<CollectionConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Portfolio".to_string(),
            description: String::new(),
            author: String::new(),

            url: "http://localhost:3000".to_string(),

            public_dir: "public".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string()],

            routes: vec![
                String::new(),
                "/blog".to_string(),
                "/notes".to_string(),
            ],
            collections: vec![
                CollectionConfig::new("blog", "content/posts", "/blog/"),
                CollectionConfig::new("notes", "content/notes", "/notes/"),
            ],
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Look up a collection by name
    pub fn collection(&self, name: &str) -> Option<&CollectionConfig> {
        self.collections.iter().find(|c| c.name == name)
    }
}

/// A named directory of documents served under one route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub name: String,
    /// Directory relative to the site root
    pub dir: String,
    /// URL path posts are served under, e.g. `/blog/`
    pub route: String,
}

impl CollectionConfig {
    pub fn new(name: &str, dir: &str, route: &str) -> Self {
        Self {
            name: name.to_string(),
            dir: dir.to_string(),
            route: route.to_string(),
        }
    }
}
