//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Remove generated output
pub fn run(folio: &Folio) -> Result<()> {
    if folio.public_dir.exists() {
        fs::remove_dir_all(&folio.public_dir)?;
        tracing::info!("Deleted: {:?}", folio.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_public_dir() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        fs::create_dir_all(&folio.public_dir).unwrap();
        fs::write(folio.public_dir.join("sitemap.xml"), "<urlset/>").unwrap();

        run(&folio).unwrap();
        assert!(!folio.public_dir.exists());

        // Nothing to clean is fine
        run(&folio).unwrap();
    }
}
