//! Write the sitemap to the public directory

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Folio;

/// Build `sitemap.xml` for every collection and write it under `public_dir`
pub fn run(folio: &Folio) -> Result<PathBuf> {
    let today = chrono::Local::now().date_naive();
    write(folio, today)
}

pub fn write(folio: &Folio, today: chrono::NaiveDate) -> Result<PathBuf> {
    let sitemap = folio.sitemap(today)?;

    fs::create_dir_all(&folio.public_dir)?;
    let output_path = folio.public_dir.join("sitemap.xml");
    fs::write(&output_path, sitemap.to_xml())?;
    tracing::info!("Generated sitemap.xml with {} entries", sitemap.len());

    Ok(output_path)
}
