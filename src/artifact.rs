//! Locating the archive the fetch tool produced.
//!
//! Maven names its output after its own version/classifier conventions, so
//! the exact file name is not predictable from the coordinate alone. The
//! scan is prefix/suffix based and depth 1 only, and it must be
//! unambiguous: zero or several matches abort the retrieval rather than
//! silently picking one.

use crate::error::RetrieveError;
use crate::runtime::Runtime;
use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

/// Finds the single regular file directly under `dir` whose name starts
/// with `prefix` and ends with `suffix`.
#[tracing::instrument(skip(runtime))]
pub fn find_one<R: Runtime>(
    runtime: &R,
    dir: &Path,
    prefix: &str,
    suffix: &str,
) -> Result<PathBuf> {
    let mut matches: Vec<PathBuf> = runtime
        .read_dir(dir)?
        .into_iter()
        .filter(|path| {
            let name = match path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => return false,
            };
            runtime.is_file(path) && name.starts_with(prefix) && name.ends_with(suffix)
        })
        .collect();

    debug!(
        "Found {} candidate(s) for '{}*{}' in {}",
        matches.len(),
        prefix,
        suffix,
        dir.display()
    );

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(RetrieveError::ArtifactNotFound {
            artifact_id: prefix.to_string(),
            dir: dir.to_path_buf(),
        }
        .into()),
        count => Err(RetrieveError::AmbiguousArtifact {
            artifact_id: prefix.to_string(),
            count,
            dir: dir.to_path_buf(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RealRuntime;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_find_one_returns_single_match() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("acme-lib-2.3.0.zip"), "zip")?;
        fs::write(dir.path().join("unrelated.txt"), "noise")?;

        let found = find_one(&RealRuntime, dir.path(), "acme-lib", ".zip")?;
        assert!(found.ends_with("acme-lib-2.3.0.zip"));
        Ok(())
    }

    #[test]
    fn test_find_one_empty_directory_is_not_found() {
        let dir = tempdir().unwrap();

        let err = find_one(&RealRuntime, dir.path(), "acme-lib", ".zip").unwrap_err();
        match err.downcast_ref::<RetrieveError>() {
            Some(RetrieveError::ArtifactNotFound { artifact_id, .. }) => {
                assert_eq!(artifact_id, "acme-lib");
            }
            other => panic!("expected ArtifactNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_find_one_two_matches_is_ambiguous() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("acme-lib-2.3.0.zip"), "zip").unwrap();
        fs::write(dir.path().join("acme-lib-2.3.0-tests.zip"), "zip").unwrap();

        let err = find_one(&RealRuntime, dir.path(), "acme-lib", ".zip").unwrap_err();
        match err.downcast_ref::<RetrieveError>() {
            Some(RetrieveError::AmbiguousArtifact {
                artifact_id, count, ..
            }) => {
                assert_eq!(artifact_id, "acme-lib");
                assert_eq!(*count, 2);
            }
            other => panic!("expected AmbiguousArtifact, got {:?}", other),
        }
    }

    #[test]
    fn test_find_one_ignores_directories() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("acme-lib-dir.zip"))?;
        fs::write(dir.path().join("acme-lib-2.3.0.zip"), "zip")?;

        let found = find_one(&RealRuntime, dir.path(), "acme-lib", ".zip")?;
        assert!(found.ends_with("acme-lib-2.3.0.zip"));
        Ok(())
    }

    #[test]
    fn test_find_one_does_not_recurse() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("acme-lib-2.3.0.zip"), "zip").unwrap();

        let err = find_one(&RealRuntime, dir.path(), "acme-lib", ".zip").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RetrieveError>(),
            Some(RetrieveError::ArtifactNotFound { .. })
        ));
    }

    #[test]
    fn test_find_one_respects_suffix() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("acme-lib-2.3.0.zip"), "zip")?;
        fs::write(dir.path().join("acme-lib-2.3.0.tar.gz"), "tar")?;

        // Only one of the two satisfies the suffix, so this is unambiguous.
        let found = find_one(&RealRuntime, dir.path(), "acme-lib", ".zip")?;
        assert!(found.ends_with("acme-lib-2.3.0.zip"));
        Ok(())
    }

    #[test]
    fn test_find_one_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(find_one(&RealRuntime, &missing, "acme-lib", ".zip").is_err());
    }
}
