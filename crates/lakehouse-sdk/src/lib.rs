//! Spark session scaffolding for JupyterHub notebook environments.
//!
//! This crate produces the two files a notebook user imports and reads: an
//! initialization module (`spark_init.py`) that builds a Kubernetes-backed
//! Spark session with optional Delta Lake and Hive metastore support, and a
//! usage README. It also resolves the driver address and prepares the launch
//! environment a PySpark process needs.
//!
//! # Modules
//!
//! - [`host`]: Local hostname and driver address resolution
//! - [`launch`]: `PYSPARK_SUBMIT_ARGS` / `SPARK_DRIVER_HOST` as an explicit value
//! - [`session`]: Structured session profile (sections, feature flags, env lookups)
//! - [`render`]: Askama rendering of the profile into Python and Markdown
//! - [`artifacts`]: Output file naming and create-or-overwrite writes
//! - [`generator`]: The end-to-end pipeline tying the above together

pub mod artifacts;
pub mod error;
pub mod generator;
pub mod host;
pub mod launch;
pub mod render;
pub mod session;

pub use error::{GeneratorError, GeneratorResult};
