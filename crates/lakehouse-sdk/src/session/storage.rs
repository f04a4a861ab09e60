//! Cloud storage backends wired into the session: S3 through `s3a`, and Azure
//! Blob / Data Lake Storage Gen2 through `wasbs` and `abfss`.

use super::{ConfigEntry, ConfigSection};

/// Storage endpoints a notebook user can read from once the session exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    AzureBlob,
    AzureDataLake,
}

impl StorageBackend {
    pub const ALL: [StorageBackend; 3] = [Self::S3, Self::AzureBlob, Self::AzureDataLake];

    pub fn scheme(&self) -> &'static str {
        match self {
            Self::S3 => "s3a",
            Self::AzureBlob => "wasbs",
            Self::AzureDataLake => "abfss",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::S3 => "AWS S3",
            Self::AzureBlob => "Azure Blob Storage",
            Self::AzureDataLake => "Azure Data Lake Storage Gen2",
        }
    }

    /// A URI showing the shape of a path on this backend.
    pub fn example_uri(&self) -> String {
        let authority = match self {
            Self::S3 => "bucket-name",
            Self::AzureBlob => "container@account.blob.core.windows.net",
            Self::AzureDataLake => "container@account.dfs.core.windows.net",
        };
        format!("{}://{}/path/to/file.csv", self.scheme(), authority)
    }
}

/// Azure account and service principal values written into the session.
///
/// Each field defaults to a `{placeholder}` token that the notebook user
/// replaces by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureCredentials {
    pub account_name: String,
    pub account_key: String,
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
}

impl Default for AzureCredentials {
    fn default() -> Self {
        Self {
            account_name: "{account_name}".to_string(),
            account_key: "{account_key}".to_string(),
            client_id: "{client_id}".to_string(),
            client_secret: "{client_secret}".to_string(),
            tenant_id: "{tenant_id}".to_string(),
        }
    }
}

impl AzureCredentials {
    fn blob_host(&self) -> String {
        format!("{}.blob.core.windows.net", self.account_name)
    }

    fn dfs_host(&self) -> String {
        format!("{}.dfs.core.windows.net", self.account_name)
    }

    pub fn token_endpoint(&self) -> String {
        format!(
            "https://login.microsoftonline.com/{}/oauth2/token",
            self.tenant_id
        )
    }
}

pub(crate) fn s3_section() -> ConfigSection {
    ConfigSection::new(
        ["Configure cloud storage", StorageBackend::S3.label()],
        vec![
            ConfigEntry::literal(
                "spark.hadoop.fs.s3a.impl",
                "org.apache.hadoop.fs.s3a.S3AFileSystem",
            ),
            ConfigEntry::literal(
                "spark.hadoop.fs.s3a.aws.credentials.provider",
                "com.amazonaws.auth.DefaultAWSCredentialsProviderChain",
            ),
        ],
    )
}

pub(crate) fn azure_section(credentials: &AzureCredentials) -> ConfigSection {
    let blob = credentials.blob_host();
    let dfs = credentials.dfs_host();
    ConfigSection::new(
        [StorageBackend::AzureBlob.label()],
        vec![
            ConfigEntry::literal(
                format!("spark.hadoop.fs.azure.account.key.{blob}"),
                credentials.account_key.clone(),
            ),
            ConfigEntry::literal(
                format!("spark.hadoop.fs.azure.account.auth.type.{dfs}"),
                "OAuth",
            ),
            ConfigEntry::literal(
                format!("spark.hadoop.fs.azure.account.oauth.provider.type.{dfs}"),
                "org.apache.hadoop.fs.azurebfs.oauth2.ClientCredsTokenProvider",
            ),
            ConfigEntry::literal(
                format!("spark.hadoop.fs.azure.account.oauth2.client.id.{dfs}"),
                credentials.client_id.clone(),
            ),
            ConfigEntry::literal(
                format!("spark.hadoop.fs.azure.account.oauth2.client.secret.{dfs}"),
                credentials.client_secret.clone(),
            ),
            ConfigEntry::literal(
                format!("spark.hadoop.fs.azure.account.oauth2.client.endpoint.{dfs}"),
                credentials.token_endpoint(),
            ),
        ],
    )
}
