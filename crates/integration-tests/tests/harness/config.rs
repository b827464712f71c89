//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, path::Path, time::Duration};

use recite_config::{
    Config, FilesystemStorageConfig, HealthConfig, MemoryStorageConfig, PollyConfig, S3StorageConfig, ServerConfig,
    StorageConfig, SynthesisConfig, TtsConfig,
};
use secrecy::SecretString;

pub const SIGNING_KEY: &str = "integration-signing-key";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder with Polly pointed at `polly_url` and in-memory storage
    pub fn new(polly_url: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                tts: TtsConfig::default(),
                synthesis: SynthesisConfig::Polly(PollyConfig {
                    region: "us-east-1".to_owned(),
                    access_key_id: Some(SecretString::from("AKIDTEST")),
                    secret_access_key: Some(SecretString::from("test-secret")),
                    endpoint_url: Some(polly_url.parse().expect("valid URL")),
                }),
                storage: StorageConfig::Memory(MemoryStorageConfig {
                    signing_key: SecretString::from(SIGNING_KEY),
                }),
                telemetry: None,
            },
        }
    }

    /// Store artifacts as files under `root`
    pub fn with_filesystem_storage(mut self, root: &Path) -> Self {
        self.config.storage = StorageConfig::Filesystem(FilesystemStorageConfig {
            root: root.to_path_buf(),
            signing_key: SecretString::from(SIGNING_KEY),
        });
        self
    }

    /// Store artifacts in `bucket` on the S3 endpoint at `endpoint_url`
    pub fn with_s3_storage(mut self, endpoint_url: &str, bucket: &str) -> Self {
        self.config.storage = StorageConfig::S3(S3StorageConfig {
            bucket: bucket.to_owned(),
            region: "us-east-1".to_owned(),
            access_key_id: Some(SecretString::from("AKIDTEST")),
            secret_access_key: Some(SecretString::from("test-secret")),
            endpoint_url: Some(endpoint_url.parse().expect("valid URL")),
            force_path_style: true,
        });
        self
    }

    /// Set the validity window of issued links
    pub fn with_link_ttl(mut self, ttl: Duration) -> Self {
        self.config.tts.link_ttl = ttl;
        self
    }

    /// Set the longest accepted text
    pub fn with_max_text_length(mut self, max: usize) -> Self {
        self.config.tts.max_text_length = max;
        self
    }

    /// Serialize concurrent misses per key
    pub fn with_single_flight(mut self) -> Self {
        self.config.tts.single_flight = true;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
