//! Generated artifact naming and output.
//!
//! Artifacts are written with a plain create-or-overwrite: the parent
//! directory must already exist and no temp-file-then-rename is used.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{GeneratorError, GeneratorResult};

/// Home directory of the notebook user in the JupyterHub single-user image.
pub const DEFAULT_OUTPUT_DIR: &str = "/home/jovyan";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    SparkInit,
    Readme,
}

impl ArtifactKind {
    /// Write order.
    pub const ALL: [ArtifactKind; 2] = [Self::SparkInit, Self::Readme];

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::SparkInit => "spark_init.py",
            Self::Readme => "README.md",
        }
    }

    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SparkInit => write!(f, "Spark initialization template"),
            Self::Readme => write!(f, "README"),
        }
    }
}

/// A rendered file ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub content: String,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, dir: &Path, content: String) -> Self {
        Self {
            kind,
            path: kind.path_in(dir),
            content,
        }
    }
}

/// Write `artifact`, replacing whatever is at its path.
pub fn write_artifact(artifact: &Artifact) -> GeneratorResult<()> {
    std::fs::write(&artifact.path, &artifact.content).map_err(|source| GeneratorError::Write {
        path: artifact.path.clone(),
        source,
    })?;

    tracing::info!(
        kind = %artifact.kind,
        path = %artifact.path.display(),
        bytes = artifact.content.len(),
        "Wrote artifact"
    );
    Ok(())
}
