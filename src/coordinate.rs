//! Artifact coordinates and version-placeholder substitution.
//!
//! A coordinate addresses one published archive in the repository:
//! `groupId:artifactId:version[:packaging[:classifier]]`. The version
//! segment may carry a `${library.<name>.version}` placeholder that is
//! resolved textually against the requested library version.

use anyhow::{Result, bail};
use std::fmt;
use std::str::FromStr;

/// Parsed artifact coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: Option<String>,
    pub classifier: Option<String>,
}

impl FromStr for Coordinate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 3 || parts[..3].iter().any(|p| p.is_empty()) {
            bail!(
                "Invalid artifact coordinate '{}'. Expected 'groupId:artifactId:version[:packaging[:classifier]]'.",
                s
            )
        }
        Ok(Coordinate {
            group_id: parts[0].to_string(),
            artifact_id: parts[1].to_string(),
            version: parts[2].to_string(),
            packaging: parts.get(3).map(|p| p.to_string()),
            classifier: parts.get(4).map(|p| p.to_string()),
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)?;
        if let Some(packaging) = &self.packaging {
            write!(f, ":{}", packaging)?;
        }
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        Ok(())
    }
}

/// Replaces every `${library.<name>.version}` occurrence in `details` with
/// `version`. The version is inserted verbatim; it is never interpreted as
/// a pattern. A coordinate without the placeholder is returned unchanged,
/// since the version may have been hard-coded in the configuration.
pub fn resolve_version(details: &str, name: &str, version: &str) -> String {
    let placeholder = format!("${{library.{}.version}}", name);
    details.replace(&placeholder, version)
}
