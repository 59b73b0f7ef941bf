//! Error taxonomy for the retrieval pipeline.

use std::path::PathBuf;

/// Failures a retrieval can end in. Every variant aborts the pipeline;
/// nothing here is retried.
#[derive(Debug)]
pub enum RetrieveError {
    /// Missing/invalid artifact coordinate, or no usable mvn executable.
    /// The user must fix the configuration.
    Configuration(String),
    /// The fetch subprocess exited non-zero (or died to a signal).
    Process {
        exit_code: Option<i32>,
        output: String,
    },
    /// No file matching `<artifact_id>*<suffix>` after a successful fetch.
    ArtifactNotFound { artifact_id: String, dir: PathBuf },
    /// More than one file matched; stale destination directory or naming
    /// collision.
    AmbiguousArtifact {
        artifact_id: String,
        count: usize,
        dir: PathBuf,
    },
    /// The located archive disappeared before extraction.
    ArchiveMissing(PathBuf),
    /// The archive could not be unpacked into the destination.
    Extraction { archive: PathBuf, reason: String },
}

impl std::fmt::Display for RetrieveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetrieveError::Configuration(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
            RetrieveError::Process { exit_code, output } => match exit_code {
                Some(code) => write!(
                    f,
                    "Error downloading artifact (exit code {}):\n{}",
                    code, output
                ),
                None => write!(
                    f,
                    "Error downloading artifact (terminated by signal):\n{}",
                    output
                ),
            },
            RetrieveError::ArtifactNotFound { artifact_id, dir } => {
                write!(
                    f,
                    "Unable to find library '{}' in {}",
                    artifact_id,
                    dir.display()
                )
            }
            RetrieveError::AmbiguousArtifact {
                artifact_id,
                count,
                dir,
            } => {
                write!(
                    f,
                    "Found {} files matching library '{}' in {}, expected exactly one. \
                     The destination directory may be stale.",
                    count,
                    artifact_id,
                    dir.display()
                )
            }
            RetrieveError::ArchiveMissing(path) => {
                write!(f, "Archive {} does not exist", path.display())
            }
            RetrieveError::Extraction { archive, reason } => {
                write!(f, "Failed to extract {}: {}", archive.display(), reason)
            }
        }
    }
}

impl std::error::Error for RetrieveError {}
