//! List the posts of a collection

use anyhow::{Context, Result};
use std::fmt::Write;

use crate::content::PostListing;
use crate::Folio;

/// List a collection's posts, newest first
pub fn run(folio: &Folio, collection: &str, json: bool) -> Result<()> {
    let Some(config) = folio.config.collection(collection) else {
        let available: Vec<_> = folio
            .config
            .collections
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        anyhow::bail!(
            "Unknown collection: {}. Available: {}",
            collection,
            available.join(", ")
        );
    };

    let listing = folio
        .registry(config)
        .list_posts()
        .with_context(|| format!("Failed to list collection '{}'", collection))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing.posts)?);
    } else {
        print!("{}", format_listing(collection, &listing));
    }

    Ok(())
}

/// Human-readable listing, including anything that was skipped
pub fn format_listing(collection: &str, listing: &PostListing) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Posts in {} ({}):", collection, listing.posts.len());
    for post in &listing.posts {
        let _ = writeln!(
            out,
            "  {:<10}  {} [{}]",
            post.published_at().unwrap_or("undated"),
            post.title(),
            post.slug
        );
    }

    if !listing.failures.is_empty() {
        let _ = writeln!(out, "Failed ({}):", listing.failures.len());
        for failure in &listing.failures {
            let _ = writeln!(out, "  {}", failure);
        }
    }

    if !listing.issues.is_empty() {
        let _ = writeln!(out, "Front-matter issues ({}):", listing.issues.len());
        for issue in &listing.issues {
            let _ = writeln!(out, "  {}: {}", issue.path.display(), issue.issue);
        }
    }

    out
}
