//! Sitemap generation

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{CollectionConfig, SiteConfig};
use crate::content::Post;
use crate::error::SitemapError;
use crate::helpers::{full_url, post_url};

/// One `<url>` entry of the sitemap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapEntry {
    pub url: String,
    #[serde(rename = "lastModified")]
    pub last_modified: String,
}

/// Sitemap for the whole site: static routes first, then posts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sitemap {
    pub entries: Vec<SitemapEntry>,
}

impl Sitemap {
    /// Build the sitemap from configured routes and the posts of each collection.
    ///
    /// Static routes are stamped with `today`. Every post must carry
    /// `publishedAt`; the first one without it fails the build.
    pub fn build(
        config: &SiteConfig,
        collections: &[(&CollectionConfig, &[Post])],
        today: NaiveDate,
    ) -> Result<Self, SitemapError> {
        let today = today.format("%Y-%m-%d").to_string();

        let mut entries: Vec<SitemapEntry> = config
            .routes
            .iter()
            .map(|route| SitemapEntry {
                url: full_url(&config.url, route),
                last_modified: today.clone(),
            })
            .collect();

        for (collection, posts) in collections {
            entries.extend(post_entries(&config.url, &collection.route, posts)?);
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as a sitemaps.org XML document
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for entry in &self.entries {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                escape_xml(&entry.last_modified)
            ));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Sitemap entries for the posts of one collection
pub fn post_entries(
    base_url: &str,
    route: &str,
    posts: &[Post],
) -> Result<Vec<SitemapEntry>, SitemapError> {
    posts
        .iter()
        .map(|post| {
            let last_modified =
                post.published_at()
                    .ok_or_else(|| SitemapError::MissingExpectedField {
                        slug: post.slug.clone(),
                        field: "publishedAt",
                    })?;
            Ok(SitemapEntry {
                url: post_url(base_url, route, &post.slug),
                last_modified: last_modified.to_string(),
            })
        })
        .collect()
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
