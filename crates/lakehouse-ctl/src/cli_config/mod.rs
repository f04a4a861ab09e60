//! Optional `.lakehouse-ctl.toml` settings.
//!
//! Every key is optional; an absent file yields the stock JupyterHub
//! deployment (`/home/jovyan`, `openlake/jupyterhub-spark:latest`, the
//! `openlake-hive-metastore` service, and `{placeholder}` Azure credentials).

pub(crate) mod loader;

pub(crate) use loader::load_cli_config;

use std::path::{Path, PathBuf};

use lakehouse_sdk::artifacts::DEFAULT_OUTPUT_DIR;
use lakehouse_sdk::launch::{default_packages, SparkPackage};
use lakehouse_sdk::session::{AzureCredentials, ProfileSettings};
use serde::Deserialize;

use crate::error::{CtlError, CtlResult};

/// Azure account and service principal identifiers.
///
/// Secrets (account key, client secret) stay as placeholders in the generated
/// module and are never read from this file.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct AzureConfig {
    pub account_name: Option<String>,
    pub tenant_id: Option<String>,
    pub client_id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CliConfig {
    /// Directory the artifacts are written to. Default: `/home/jovyan`.
    pub output_dir: Option<String>,

    pub container_image: Option<String>,

    pub service_account: Option<String>,

    /// Fallback for `HIVE_METASTORE_URI` inside the generated module.
    pub metastore_uri: Option<String>,

    /// Fallback for `NAMESPACE` inside the generated module.
    pub namespace: Option<String>,

    /// Maven coordinates appended to the default `--packages` list.
    #[serde(default)]
    pub extra_packages: Vec<String>,

    #[serde(default)]
    pub azure: AzureConfig,
}

impl CliConfig {
    /// Flag value, then config file, then `/home/jovyan`.
    pub(crate) fn output_dir(&self, flag: Option<&Path>) -> PathBuf {
        if let Some(dir) = flag {
            return dir.to_path_buf();
        }
        self.output_dir
            .as_deref()
            .map(loader::expand_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub(crate) fn packages(&self) -> CtlResult<Vec<SparkPackage>> {
        let mut packages = default_packages();
        for coordinate in &self.extra_packages {
            let package = coordinate
                .parse::<SparkPackage>()
                .map_err(|source| CtlError::Config {
                    key: "extra-packages",
                    source,
                })?;
            if !packages.contains(&package) {
                packages.push(package);
            }
        }
        Ok(packages)
    }

    pub(crate) fn profile_settings(&self) -> ProfileSettings {
        let defaults = ProfileSettings::default();
        let azure_defaults = AzureCredentials::default();
        ProfileSettings {
            container_image: self
                .container_image
                .clone()
                .unwrap_or(defaults.container_image),
            service_account: self
                .service_account
                .clone()
                .unwrap_or(defaults.service_account),
            metastore_uri: self.metastore_uri.clone().unwrap_or(defaults.metastore_uri),
            namespace: self.namespace.clone().unwrap_or(defaults.namespace),
            azure: AzureCredentials {
                account_name: self
                    .azure
                    .account_name
                    .clone()
                    .unwrap_or(azure_defaults.account_name),
                tenant_id: self
                    .azure
                    .tenant_id
                    .clone()
                    .unwrap_or(azure_defaults.tenant_id),
                client_id: self
                    .azure
                    .client_id
                    .clone()
                    .unwrap_or(azure_defaults.client_id),
                ..azure_defaults
            },
        }
    }
}
