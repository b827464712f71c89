use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Artifact storage backend
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageConfig {
    /// In-process storage (single instance only, lost on restart)
    Memory(MemoryStorageConfig),
    /// Local directory, links served and signed by this service
    Filesystem(FilesystemStorageConfig),
    /// S3-compatible bucket with presigned links
    S3(S3StorageConfig),
}

impl StorageConfig {
    /// Whether artifact links point back at this service
    pub const fn serves_links_locally(&self) -> bool {
        matches!(self, Self::Memory(_) | Self::Filesystem(_))
    }
}

/// In-memory storage configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryStorageConfig {
    /// HMAC key for artifact links
    pub signing_key: SecretString,
}

/// Filesystem storage configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesystemStorageConfig {
    /// Directory that holds the artifacts
    pub root: PathBuf,
    /// HMAC key for artifact links
    pub signing_key: SecretString,
}

/// S3 storage configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct S3StorageConfig {
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Access key ID (optional, uses default credential chain if absent)
    #[serde(default)]
    pub access_key_id: Option<SecretString>,
    /// Secret access key
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
    /// Endpoint override for S3-compatible stores (MinIO, R2)
    #[serde(default)]
    pub endpoint_url: Option<Url>,
    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`
    #[serde(default)]
    pub force_path_style: bool,
}
