//! Tagged error kinds for the archive pipeline.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::client::ClientError;

/// Which on-disk artifact an export failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// The structured JSON interchange document.
    Interchange,
    /// The binary full-fidelity snapshot.
    Snapshot,
    /// The human-readable markdown directory tree.
    Markdown,
    /// The bound roster document.
    Roster,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Artifact::Interchange => "interchange",
            Artifact::Snapshot => "snapshot",
            Artifact::Markdown => "markdown",
            Artifact::Roster => "roster",
        };
        f.write_str(tag)
    }
}

/// Errors produced by the crawl, roster-binding, and persistence phases.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// A top-level fetch (guild lookup, channel enumeration) failed.
    #[error("platform request failed: {0}")]
    Client(#[from] ClientError),

    /// An unexpected failure while processing one category. Permission
    /// denials never reach this variant; those are recovered in place.
    #[error("error processing category {category}: {source}")]
    Crawl {
        category: String,
        #[source]
        source: ClientError,
    },

    /// Roster binding hit a state the data model forbids.
    #[error("integrity violation for student {student}: {reason}")]
    Integrity { student: String, reason: String },

    /// One of the export artifacts could not be written.
    #[error("failed to write {artifact} artifact at {path}: {source}")]
    ArtifactWrite {
        artifact: Artifact,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// A previously saved interchange document could not be read back.
    #[error("failed to load server data from {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl ArchiveError {
    pub(crate) fn artifact(artifact: Artifact, path: PathBuf, source: impl Into<anyhow::Error>) -> Self {
        Self::ArtifactWrite {
            artifact,
            path,
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_write_names_the_artifact() {
        let err = ArchiveError::artifact(
            Artifact::Snapshot,
            PathBuf::from("/tmp/out.bin"),
            std::io::Error::other("disk full"),
        );
        let text = err.to_string();
        assert!(text.contains("snapshot"));
        assert!(text.contains("/tmp/out.bin"));
    }

    #[test]
    fn integrity_names_the_student() {
        let err = ArchiveError::Integrity {
            student: "a1b2c3".to_string(),
            reason: "no matching category".to_string(),
        };
        assert!(err.to_string().contains("a1b2c3"));
    }
}
