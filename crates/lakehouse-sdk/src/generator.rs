//! End-to-end generation pipeline.
//!
//! ```text
//! HostSource ──resolve──▶ HostIdentity ──▶ LaunchEnvironment ──export──▶ process env
//!                                                    │
//! SessionProfile ──render──▶ spark_init.py ──write──▶ on_written ──▶ README.md ──write──▶ on_written
//! ```
//!
//! Steps run strictly in that order and stop at the first error. Nothing is
//! rolled back: a README failure leaves `spark_init.py` in place.

use std::net::IpAddr;
use std::path::PathBuf;

use crate::artifacts::{self, Artifact, ArtifactKind, DEFAULT_OUTPUT_DIR};
use crate::error::GeneratorResult;
use crate::host::{HostIdentity, HostSource};
use crate::launch::{default_packages, LaunchEnvironment, SparkPackage};
use crate::render;
use crate::session::SessionProfile;

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub output_dir: PathBuf,
    pub host: HostSource,
    pub packages: Vec<SparkPackage>,
    pub profile: SessionProfile,
    /// Set the launch variables on the current process before writing.
    pub export_env: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            host: HostSource::Local,
            packages: default_packages(),
            profile: SessionProfile::default(),
            export_env: true,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub host: HostIdentity,
    pub launch: LaunchEnvironment,
    pub written: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn driver_host(&self) -> IpAddr {
        self.launch.driver_host()
    }
}

#[derive(Debug)]
pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Run every step, calling `on_written` after each artifact lands on disk.
    pub async fn run<F>(&self, mut on_written: F) -> GeneratorResult<GenerationReport>
    where
        F: FnMut(&Artifact),
    {
        let host = self.options.host.resolve().await?;
        tracing::debug!(%host, "Driver host identity");

        let launch = LaunchEnvironment::new(self.options.packages.clone(), host.address);
        if self.options.export_env {
            launch.export_to_process();
        }

        let mut written = Vec::with_capacity(ArtifactKind::ALL.len());
        for kind in ArtifactKind::ALL {
            let artifact = self.render(kind)?;
            artifacts::write_artifact(&artifact)?;
            on_written(&artifact);
            written.push(artifact.path);
        }

        Ok(GenerationReport {
            host,
            launch,
            written,
        })
    }

    /// Render one artifact without touching the filesystem.
    pub fn render(&self, kind: ArtifactKind) -> GeneratorResult<Artifact> {
        let content = match kind {
            ArtifactKind::SparkInit => render::render_spark_init(&self.options.profile)?,
            ArtifactKind::Readme => render::render_readme()?,
        };
        Ok(Artifact::new(kind, &self.options.output_dir, content))
    }
}
