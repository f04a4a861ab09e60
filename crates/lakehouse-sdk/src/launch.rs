//! Launch environment for a PySpark driver.
//!
//! A notebook kernel started after generation needs two variables: the Maven
//! packages to pull onto the driver/executor classpath and the address
//! executors use to reach the driver. [`LaunchEnvironment`] carries both as a
//! plain value so callers can inject it into a child process explicitly, print
//! it for a shell, or export it into the current process.

use std::fmt;
use std::net::IpAddr;
use std::process::Command;
use std::str::FromStr;

use crate::error::GeneratorError;

/// Variable PySpark reads extra `spark-submit` arguments from.
pub const SUBMIT_ARGS_VAR: &str = "PYSPARK_SUBMIT_ARGS";

/// Variable the generated module reads the driver address from.
pub const DRIVER_HOST_VAR: &str = "SPARK_DRIVER_HOST";

/// A Maven coordinate passed to `--packages`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SparkPackage {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl SparkPackage {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for SparkPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl FromStr for SparkPackage {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(*group, *artifact, *version))
            }
            _ => Err(GeneratorError::InvalidPackage(s.to_string())),
        }
    }
}

/// Delta Lake, the Hadoop Azure connector, and the AWS SDK + Hadoop S3A connector.
pub fn default_packages() -> Vec<SparkPackage> {
    vec![
        SparkPackage::new("io.delta", "delta-spark_2.12", "3.2.0"),
        SparkPackage::new("org.apache.hadoop", "hadoop-azure", "3.3.4"),
        SparkPackage::new("com.amazonaws", "aws-java-sdk-bundle", "1.12.262"),
        SparkPackage::new("org.apache.hadoop", "hadoop-aws", "3.3.4"),
    ]
}

/// Environment a PySpark driver process is started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchEnvironment {
    packages: Vec<SparkPackage>,
    driver_host: IpAddr,
}

impl LaunchEnvironment {
    pub fn new(packages: Vec<SparkPackage>, driver_host: IpAddr) -> Self {
        Self {
            packages,
            driver_host,
        }
    }

    pub fn packages(&self) -> &[SparkPackage] {
        &self.packages
    }

    pub fn driver_host(&self) -> IpAddr {
        self.driver_host
    }

    /// `--packages a,b,c pyspark-shell`; the trailing `pyspark-shell` is required
    /// by PySpark when the variable is set at all.
    pub fn submit_args(&self) -> String {
        let coordinates: Vec<String> = self.packages.iter().map(ToString::to_string).collect();
        if coordinates.is_empty() {
            return "pyspark-shell".to_string();
        }
        format!("--packages {} pyspark-shell", coordinates.join(","))
    }

    /// Variables in the order they are exported.
    pub fn vars(&self) -> [(&'static str, String); 2] {
        [
            (SUBMIT_ARGS_VAR, self.submit_args()),
            (DRIVER_HOST_VAR, self.driver_host.to_string()),
        ]
    }

    /// Inject the variables into a child process about to be spawned.
    pub fn apply_to<'a>(&self, command: &'a mut Command) -> &'a mut Command {
        for (key, value) in self.vars() {
            command.env(key, value);
        }
        command
    }

    /// POSIX shell `export` lines, one per variable, for `eval "$(...)"`.
    pub fn shell_exports(&self) -> String {
        self.vars()
            .iter()
            .map(|(key, value)| format!("export {key}={}", shell_quote(value)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Set the variables on the current process so an embedded runtime or any
    /// later child inherits them.
    ///
    /// Must run before other threads read the environment; the CLI calls it
    /// from a current-thread runtime.
    pub fn export_to_process(&self) {
        for (key, value) in self.vars() {
            tracing::debug!(key, value = %value, "Exporting launch variable");
            std::env::set_var(key, value);
        }
    }
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
