//! Structured Spark session profile.
//!
//! The generated `spark_init.py` is a rendering of a [`SessionProfile`]: the
//! environment lookups the module performs, followed by ordered sections of
//! `spark.*` settings. Sections guarded by a [`FeatureFlag`] become `if`
//! blocks in Python and are skipped by [`SessionProfile::resolve`] when the
//! flag is off.

pub mod storage;

use std::collections::HashMap;

pub use storage::{AzureCredentials, StorageBackend};

pub const DEFAULT_APP_NAME: &str = "JupyterHub Spark";
pub const DEFAULT_SPARK_MASTER: &str = "k8s://https://kubernetes.default.svc";
pub const DEFAULT_CONTAINER_IMAGE: &str = "openlake/jupyterhub-spark:latest";
pub const DEFAULT_SERVICE_ACCOUNT: &str = "spark";
pub const DEFAULT_METASTORE_URI: &str = "thrift://openlake-hive-metastore:9083";
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_DRIVER_PORT: u16 = 29413;
pub const DEFAULT_LOG_LEVEL: &str = "WARN";

pub const METASTORE_URI_VAR: &str = "HIVE_METASTORE_URI";
pub const NAMESPACE_VAR: &str = "NAMESPACE";

/// Optional integrations toggled by `get_spark_session` keyword arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureFlag {
    Hive,
    Delta,
}

impl FeatureFlag {
    /// Keyword argument name in the generated factory function.
    pub fn param_name(&self) -> &'static str {
        match self {
            Self::Hive => "enable_hive",
            Self::Delta => "enable_delta",
        }
    }
}

/// A local variable in the generated module, populated from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    DriverHost,
    MetastoreUri,
    Namespace,
}

impl Binding {
    pub fn ident(&self) -> &'static str {
        match self {
            Self::DriverHost => "driver_host",
            Self::MetastoreUri => "hive_metastore_uri",
            Self::Namespace => "k8s_namespace",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Literal(String),
    Variable(Binding),
}

impl ConfigValue {
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Variable(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: ConfigValue,
}

impl ConfigEntry {
    pub fn literal(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: ConfigValue::Literal(value.into()),
        }
    }

    pub fn variable(key: impl Into<String>, binding: Binding) -> Self {
        Self {
            key: key.into(),
            value: ConfigValue::Variable(binding),
        }
    }
}

/// An ordered group of settings applied to the session builder together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSection {
    /// Comment lines emitted above the section.
    pub comments: Vec<String>,
    pub guard: Option<FeatureFlag>,
    pub entries: Vec<ConfigEntry>,
    /// Finish the chain with `.enableHiveSupport()`.
    pub enable_hive_support: bool,
}

impl ConfigSection {
    pub fn new<S: Into<String>>(
        comments: impl IntoIterator<Item = S>,
        entries: Vec<ConfigEntry>,
    ) -> Self {
        Self {
            comments: comments.into_iter().map(Into::into).collect(),
            guard: None,
            entries,
            enable_hive_support: false,
        }
    }

    pub fn guarded(mut self, flag: FeatureFlag) -> Self {
        self.guard = Some(flag);
        self
    }

    pub fn with_hive_support(mut self) -> Self {
        self.enable_hive_support = true;
        self
    }
}

/// Fallback used when an environment variable is unset at session time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupDefault {
    Literal(String),
    /// The address the notebook host's own name resolves to.
    LocalAddress,
}

/// `binding = os.environ.get(variable, default)` in the generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLookup {
    pub binding: Binding,
    pub variable: &'static str,
    pub default: LookupDefault,
}

/// Deployment values a profile is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSettings {
    pub container_image: String,
    pub service_account: String,
    pub metastore_uri: String,
    pub namespace: String,
    pub azure: AzureCredentials,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            container_image: DEFAULT_CONTAINER_IMAGE.to_string(),
            service_account: DEFAULT_SERVICE_ACCOUNT.to_string(),
            metastore_uri: DEFAULT_METASTORE_URI.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            azure: AzureCredentials::default(),
        }
    }
}

/// Keyword arguments a notebook passes to `get_spark_session`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub app_name: Option<String>,
    pub enable_hive: bool,
    pub enable_delta: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            app_name: None,
            enable_hive: true,
            enable_delta: true,
        }
    }
}

impl SessionOptions {
    pub fn is_enabled(&self, flag: FeatureFlag) -> bool {
        match flag {
            FeatureFlag::Hive => self.enable_hive,
            FeatureFlag::Delta => self.enable_delta,
        }
    }
}

/// The settings a generated module would apply for one set of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSession {
    pub app_name: String,
    pub settings: Vec<(String, String)>,
    pub hive_support: bool,
}

impl ResolvedSession {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProfile {
    pub default_app_name: String,
    pub lookups: Vec<EnvLookup>,
    pub sections: Vec<ConfigSection>,
    pub log_level: String,
}

impl Default for SessionProfile {
    fn default() -> Self {
        Self::from_settings(&ProfileSettings::default())
    }
}

impl SessionProfile {
    pub fn from_settings(settings: &ProfileSettings) -> Self {
        let lookups = vec![
            EnvLookup {
                binding: Binding::DriverHost,
                variable: crate::launch::DRIVER_HOST_VAR,
                default: LookupDefault::LocalAddress,
            },
            EnvLookup {
                binding: Binding::MetastoreUri,
                variable: METASTORE_URI_VAR,
                default: LookupDefault::Literal(settings.metastore_uri.clone()),
            },
            EnvLookup {
                binding: Binding::Namespace,
                variable: NAMESPACE_VAR,
                default: LookupDefault::Literal(settings.namespace.clone()),
            },
        ];

        let kubernetes = ConfigSection::new(
            ["Configure Kubernetes"],
            vec![
                ConfigEntry::literal("spark.master", DEFAULT_SPARK_MASTER),
                ConfigEntry::variable("spark.kubernetes.namespace", Binding::Namespace),
                ConfigEntry::literal("spark.executor.instances", "2"),
                ConfigEntry::literal("spark.executor.memory", "2g"),
                ConfigEntry::literal("spark.executor.cores", "1"),
                ConfigEntry::literal("spark.driver.memory", "2g"),
                ConfigEntry::literal("spark.driver.cores", "1"),
                ConfigEntry::literal(
                    "spark.kubernetes.container.image",
                    settings.container_image.clone(),
                ),
                ConfigEntry::literal(
                    "spark.kubernetes.authenticate.driver.serviceAccountName",
                    settings.service_account.clone(),
                ),
                ConfigEntry::variable("spark.driver.host", Binding::DriverHost),
                ConfigEntry::literal("spark.driver.port", DEFAULT_DRIVER_PORT.to_string()),
            ],
        );

        let delta = ConfigSection::new(
            ["Configure Delta Lake if enabled"],
            vec![
                ConfigEntry::literal(
                    "spark.sql.extensions",
                    "io.delta.sql.DeltaSparkSessionExtension",
                ),
                ConfigEntry::literal(
                    "spark.sql.catalog.spark_catalog",
                    "org.apache.spark.sql.delta.catalog.DeltaCatalog",
                ),
            ],
        )
        .guarded(FeatureFlag::Delta);

        let hive = ConfigSection::new(
            ["Configure Hive if enabled"],
            vec![
                ConfigEntry::literal("spark.sql.catalogImplementation", "hive"),
                ConfigEntry::variable("hive.metastore.uris", Binding::MetastoreUri),
            ],
        )
        .guarded(FeatureFlag::Hive)
        .with_hive_support();

        Self {
            default_app_name: DEFAULT_APP_NAME.to_string(),
            lookups,
            sections: vec![
                kubernetes,
                delta,
                hive,
                storage::s3_section(),
                storage::azure_section(&settings.azure),
            ],
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Evaluate the profile the way the generated module does at session time.
    ///
    /// `env` stands in for `os.environ.get`; `local_address` is the value the
    /// driver-host lookup falls back to.
    pub fn resolve<F>(
        &self,
        options: &SessionOptions,
        env: F,
        local_address: &str,
    ) -> ResolvedSession
    where
        F: Fn(&str) -> Option<String>,
    {
        let bindings: HashMap<Binding, String> = self
            .lookups
            .iter()
            .map(|lookup| {
                let value = env(lookup.variable).unwrap_or_else(|| match &lookup.default {
                    LookupDefault::Literal(value) => value.clone(),
                    LookupDefault::LocalAddress => local_address.to_string(),
                });
                (lookup.binding, value)
            })
            .collect();

        let mut settings = Vec::new();
        let mut hive_support = false;

        for section in &self.sections {
            if let Some(flag) = section.guard {
                if !options.is_enabled(flag) {
                    continue;
                }
            }
            for entry in &section.entries {
                let value = match &entry.value {
                    ConfigValue::Literal(value) => value.clone(),
                    ConfigValue::Variable(binding) => {
                        bindings.get(binding).cloned().unwrap_or_default()
                    }
                };
                settings.push((entry.key.clone(), value));
            }
            hive_support |= section.enable_hive_support;
        }

        ResolvedSession {
            app_name: options
                .app_name
                .clone()
                .unwrap_or_else(|| self.default_app_name.clone()),
            settings,
            hive_support,
        }
    }
}
