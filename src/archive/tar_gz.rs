use crate::runtime::Runtime;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use log::{debug, info};
use std::path::Path;
use tar::Archive;

use super::{ArchiveExtractor, validate_entry};

/// Extractor for .tar.gz and .tgz archives
pub struct TarGzExtractor;

impl ArchiveExtractor for TarGzExtractor {
    fn can_handle(&self, archive_path: &Path) -> bool {
        let name = archive_path.to_string_lossy().to_lowercase();
        name.ends_with(".tar.gz") || name.ends_with(".tgz")
    }

    fn extract<R: Runtime + 'static>(
        &self,
        runtime: &R,
        archive_path: &Path,
        extract_to: &Path,
    ) -> Result<()> {
        debug!("Extracting tar.gz archive to {:?}...", extract_to);
        let file = runtime
            .open(archive_path)
            .with_context(|| format!("Failed to open archive at {:?}", archive_path))?;

        let decoder = GzDecoder::new(file);
        let mut archive = Archive::new(decoder);

        runtime.create_dir_all(extract_to)?;

        for entry in archive
            .entries()
            .with_context(|| "Failed to parse tar archive")?
        {
            let mut entry = entry.with_context(|| "Failed to read tar entry")?;
            let entry_path = entry
                .path()
                .with_context(|| "Tar entry has an invalid path")?
                .into_owned();
            validate_entry(&entry_path)?;

            let full_path = extract_to.join(&entry_path);

            if entry.header().entry_type().is_dir() {
                runtime.create_dir_all(&full_path)?;
                continue;
            }

            if let Some(parent) = full_path.parent() {
                runtime.create_dir_all(parent)?;
            }
            let mut dest_file = runtime.create_file(&full_path)?;
            std::io::copy(&mut entry, &mut dest_file)
                .with_context(|| format!("Failed to extract file {:?}", full_path))?;

            #[cfg(unix)]
            if let Ok(mode) = entry.header().mode()
                && let Err(e) = runtime.set_permissions(&full_path, mode)
            {
                debug!("Failed to set permissions on {:?}: {}", full_path, e);
            }
        }

        info!("Extraction complete.");
        Ok(())
    }
}
