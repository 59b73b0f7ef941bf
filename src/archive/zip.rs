use crate::runtime::Runtime;
use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

use super::{ArchiveExtractor, validate_entry};

/// Extractor for .zip archives
pub struct ZipExtractor;

impl ArchiveExtractor for ZipExtractor {
    fn can_handle(&self, archive_path: &Path) -> bool {
        let name = archive_path.to_string_lossy().to_lowercase();
        name.ends_with(".zip")
    }

    fn extract<R: Runtime + 'static>(
        &self,
        runtime: &R,
        archive_path: &Path,
        extract_to: &Path,
    ) -> Result<()> {
        debug!("Extracting zip archive to {:?}...", extract_to);
        let file = runtime
            .open(archive_path)
            .with_context(|| format!("Failed to open archive at {:?}", archive_path))?;

        // zip crate requires Read + Seek, but Runtime::open returns Box<dyn Read + Send>
        // We need to read the entire file into memory for seeking capability
        let mut buffer = Vec::new();
        let mut reader = file;
        reader
            .read_to_end(&mut buffer)
            .with_context(|| format!("Failed to read archive {:?}", archive_path))?;
        let cursor = std::io::Cursor::new(buffer);

        let mut archive = ZipArchive::new(cursor).with_context(|| "Failed to parse ZIP archive")?;

        runtime.create_dir_all(extract_to)?;

        // The library layout in the archive is meaningful (vars/, src/,
        // resources/), so entries are unpacked at their recorded relative
        // paths with no flattening of a top-level directory.
        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .with_context(|| format!("Failed to read ZIP entry {}", i))?;

            let entry_path = entry
                .enclosed_name()
                .ok_or_else(|| anyhow!("ZIP entry '{}' has an unsafe path", entry.name()))?;
            validate_entry(&entry_path)?;

            let full_path = extract_to.join(&entry_path);

            if entry.is_dir() {
                runtime.create_dir_all(&full_path)?;
            } else {
                if let Some(parent) = full_path.parent() {
                    runtime.create_dir_all(parent)?;
                }
                let mut dest_file = runtime.create_file(&full_path)?;
                std::io::copy(&mut entry, &mut dest_file)
                    .with_context(|| format!("Failed to extract file {:?}", full_path))?;

                // Set file permissions from archive metadata (Unix only)
                #[cfg(unix)]
                if let Some(mode) = entry.unix_mode()
                    && let Err(e) = runtime.set_permissions(&full_path, mode)
                {
                    debug!("Failed to set permissions on {:?}: {}", full_path, e);
                }
            }
        }

        info!("Extraction complete.");
        Ok(())
    }
}
