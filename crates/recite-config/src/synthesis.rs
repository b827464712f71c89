use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Speech synthesis backend
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SynthesisConfig {
    /// Amazon Polly
    Polly(PollyConfig),
}

/// Amazon Polly configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollyConfig {
    /// AWS region
    pub region: String,
    /// Access key ID (optional, uses default credential chain if absent)
    #[serde(default)]
    pub access_key_id: Option<SecretString>,
    /// Secret access key
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
    /// Endpoint override (VPC endpoints, local emulators)
    #[serde(default)]
    pub endpoint_url: Option<Url>,
}
