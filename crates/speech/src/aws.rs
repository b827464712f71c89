use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Connection settings shared by the Polly and S3 clients
pub(crate) struct AwsSettings<'a> {
    pub region: &'a str,
    pub access_key_id: Option<&'a SecretString>,
    pub secret_access_key: Option<&'a SecretString>,
    pub endpoint_url: Option<&'a Url>,
}

/// Load an SDK configuration with SDK-level retries disabled
///
/// A failed backend call fails the request; callers decide whether to retry.
pub(crate) async fn load_sdk_config(settings: AwsSettings<'_>) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(settings.region.to_owned()))
        .retry_config(aws_config::retry::RetryConfig::disabled());

    // Use explicit credentials if provided, otherwise fall back to default chain
    if let (Some(access_key), Some(secret_key)) = (settings.access_key_id, settings.secret_access_key) {
        let credentials = aws_credential_types::Credentials::new(
            access_key.expose_secret(),
            secret_key.expose_secret(),
            None,
            None,
            "recite-config",
        );
        loader = loader.credentials_provider(credentials);
    }

    if let Some(endpoint) = settings.endpoint_url {
        loader = loader.endpoint_url(endpoint.as_str().trim_end_matches('/'));
    }

    loader.load().await
}
