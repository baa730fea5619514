//! Create a new post or note

use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::content::DELIMITER;
use crate::Folio;

/// Create a new document in `collection` dated today
pub fn create_post(
    folio: &Folio,
    title: &str,
    collection: &str,
    slug: Option<&str>,
) -> Result<PathBuf> {
    let today = chrono::Local::now().date_naive();
    create_post_on(folio, title, collection, slug, today)
}

/// Create a new document with an explicit publish date
pub fn create_post_on(
    folio: &Folio,
    title: &str,
    collection: &str,
    slug: Option<&str>,
    date: NaiveDate,
) -> Result<PathBuf> {
    let Some(config) = folio.config.collection(collection) else {
        anyhow::bail!("Unknown collection: {}", collection);
    };

    if title.contains(['\n', '\r']) {
        anyhow::bail!("Title must be a single line: {:?}", title);
    }

    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}; pass one explicitly", title);
    }

    let target_dir = folio.base_dir.join(&config.dir);
    fs::create_dir_all(&target_dir)?;

    let extension = folio
        .config
        .extensions
        .first()
        .map(|e| e.trim_start_matches('.'))
        .unwrap_or("md");
    let file_path = target_dir.join(format!("{}.{}", slug, extension));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, scaffold(title, date))?;
    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}

fn scaffold(title: &str, date: NaiveDate) -> String {
    format!(
        "{delim}\ntitle: \"{title}\"\npublishedAt: {date}\nsummary: \"\"\n{delim}\n",
        delim = DELIMITER,
        title = title,
        date = date.format("%Y-%m-%d"),
    )
}
