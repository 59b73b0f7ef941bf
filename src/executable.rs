//! Locating a usable Maven executable.
//!
//! A configured Maven home is preferred; when it does not hold a runnable
//! `bin/mvn` the locator falls back to whatever the ambient search path
//! offers. The result is computed per retrieval and never cached.

use crate::process::ProcessRunner;
use crate::report::Reporter;
use crate::runtime::Runtime;
use anyhow::Result;
use log::{debug, warn};
use std::path::{Path, PathBuf};

#[cfg(not(windows))]
const MAVEN_EXECUTABLE: &str = "mvn";
#[cfg(windows)]
const MAVEN_EXECUTABLE: &str = "mvn.cmd";

#[cfg(not(windows))]
const PATH_LOOKUP: &str = "which";
#[cfg(windows)]
const PATH_LOOKUP: &str = "where";

/// Resolves the mvn executable to invoke, preferring `<maven_home>/bin`,
/// then the ambient search path. Returns `Ok(None)` when neither yields a
/// runnable tool; the caller decides how fatal that is.
#[tracing::instrument(skip(runtime, runner, reporter))]
pub fn locate_maven<R: Runtime, P: ProcessRunner>(
    runtime: &R,
    runner: &P,
    reporter: &dyn Reporter,
    maven_home: Option<&Path>,
) -> Result<Option<PathBuf>> {
    if let Some(home) = maven_home {
        let candidate = home.join("bin").join(MAVEN_EXECUTABLE);
        if runtime.is_executable(&candidate) {
            return Ok(Some(candidate));
        }
        reporter.line("=> Incorrect Maven home specified, trying system Maven...");
        warn!(
            "Configured Maven home {} has no executable {}, falling back to system lookup",
            home.display(),
            candidate.display()
        );
    }

    match runner.run(PATH_LOOKUP, &[MAVEN_EXECUTABLE.to_string()]) {
        Ok(result) if result.success() => {
            let path = result.output.lines().next().unwrap_or("").trim();
            if path.is_empty() {
                Ok(None)
            } else {
                Ok(Some(PathBuf::from(path)))
            }
        }
        Ok(result) => {
            debug!(
                "System lookup for mvn failed with exit code {:?}",
                result.exit_code
            );
            Ok(None)
        }
        Err(e) => {
            // No `which`/`where` on this host counts as not found, not as
            // a pipeline I/O failure.
            debug!("System lookup for mvn could not be run: {}", e);
            Ok(None)
        }
    }
}
