//! End-to-end retrieval of a shared library archive.
//!
//! The pipeline is linear: resolve the version placeholder, locate a Maven
//! executable, run `mvn dependency:copy` into the destination directory,
//! find the single archive it produced, unpack it and remove the archive.
//! Every stage failure aborts the retrieval; nothing is retried here, the
//! surrounding build system decides whether to run the whole call again.

use crate::archive::ArchiveExtractor;
use crate::coordinate::{Coordinate, resolve_version};
use crate::error::RetrieveError;
use crate::executable::locate_maven;
use crate::process::ProcessRunner;
use crate::report::Reporter;
use crate::runtime::Runtime;
use anyhow::Result;
use log::info;
use std::path::PathBuf;

/// Inputs driving one retrieval.
#[derive(Debug, Clone)]
pub struct RetrievalRequest {
    /// Logical name of the library, as referenced by the build.
    pub name: String,
    /// Requested version, substituted into the coordinate's placeholder.
    pub version: String,
    /// Destination directory. Exclusively owned by this request; the
    /// caller must not share it between concurrent retrievals.
    pub target: PathBuf,
}

/// Retrieves shared-library archives from a Maven repository.
pub struct Retriever {
    artifact_details: String,
    maven_home: Option<PathBuf>,
}

impl Retriever {
    pub fn new(artifact_details: impl Into<String>, maven_home: Option<PathBuf>) -> Self {
        Self {
            artifact_details: artifact_details.into(),
            maven_home,
        }
    }

    /// Runs the full retrieval pipeline for one request. On success the
    /// destination directory holds the unpacked library tree and the
    /// downloaded archive has been removed.
    #[tracing::instrument(skip(self, runtime, runner, extractor, reporter))]
    pub fn retrieve<R, P, E>(
        &self,
        runtime: &R,
        runner: &P,
        extractor: &E,
        reporter: &dyn Reporter,
        request: &RetrievalRequest,
    ) -> Result<()>
    where
        R: Runtime + 'static,
        P: ProcessRunner,
        E: ArchiveExtractor,
    {
        if self.artifact_details.trim().is_empty() {
            return Err(RetrieveError::Configuration(format!(
                "No artifact details specified for shared library: {}:{}",
                request.name, request.version
            ))
            .into());
        }

        let details = resolve_version(&self.artifact_details, &request.name, &request.version);
        let coordinate: Coordinate = details
            .parse()
            .map_err(|e: anyhow::Error| RetrieveError::Configuration(e.to_string()))?;

        reporter.line(&format!(
            "=> Library directory for build: '{}'",
            request.target.display()
        ));

        let mvn = locate_maven(runtime, runner, reporter, self.maven_home.as_deref())?
            .ok_or_else(|| {
                RetrieveError::Configuration(
                    "Unable to find mvn executable, set the Maven home in the configuration \
                     or add mvn to the PATH"
                        .to_string(),
                )
            })?;
        let mvn = mvn.to_string_lossy().into_owned();

        reporter.line(&format!("=> Using {} for downloading library", mvn));

        let args = vec![
            "dependency:copy".to_string(),
            "--update-snapshots".to_string(),
            format!("-Dartifact={}", details),
            format!("-DoutputDirectory={}", request.target.display()),
        ];
        reporter.line(&format!("=> Executing {} {}", mvn, args.join(" ")));

        let result = runner.run(&mvn, &args)?;

        reporter.line("=> Downloading library from Nexus");
        for line in result.output.lines() {
            reporter.line(line);
        }

        if !result.success() {
            return Err(RetrieveError::Process {
                exit_code: result.exit_code,
                output: result.output,
            }
            .into());
        }

        reporter.line(&format!(
            "=> Looking for artifact id: {}",
            coordinate.artifact_id
        ));
        let suffix = archive_suffix(&coordinate);
        let archive = crate::artifact::find_one(
            runtime,
            &request.target,
            &coordinate.artifact_id,
            suffix,
        )?;
        reporter.line("=> File found");

        // The fetch and the scan are separate steps; re-check the file is
        // still there before handing it to the extractor.
        if !runtime.exists(&archive) {
            return Err(RetrieveError::ArchiveMissing(archive).into());
        }

        reporter.line(&format!("=> About to unpack {}", archive.display()));
        extractor
            .extract(runtime, &archive, &request.target)
            .map_err(|e| RetrieveError::Extraction {
                archive: archive.clone(),
                reason: format!("{:#}", e),
            })?;
        runtime.remove_file(&archive)?;

        reporter.line(&format!("=> Retrieved ({})", details));
        info!(
            "Retrieved {}:{} into {}",
            request.name,
            request.version,
            request.target.display()
        );
        Ok(())
    }
}

/// Archive suffix the fetch tool will produce for this coordinate.
/// Defaults to `.zip`, the packaging shared libraries are published with.
fn archive_suffix(coordinate: &Coordinate) -> &'static str {
    match coordinate.packaging.as_deref() {
        Some("tar.gz") => ".tar.gz",
        Some("tgz") => ".tgz",
        _ => ".zip",
    }
}
