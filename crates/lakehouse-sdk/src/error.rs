//! Error types for host resolution, rendering, and artifact output.

use std::path::PathBuf;

pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("failed to read local hostname: {0}")]
    Hostname(#[source] std::io::Error),

    #[error("failed to resolve host '{hostname}': {source}")]
    HostResolution {
        hostname: String,
        source: std::io::Error,
    },

    #[error("host '{hostname}' resolved to no addresses")]
    NoAddress { hostname: String },

    #[error("invalid package coordinate '{0}': expected group:artifact:version")]
    InvalidPackage(String),

    #[error("failed to render {artifact}: {message}")]
    Render {
        artifact: &'static str,
        message: String,
    },

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
