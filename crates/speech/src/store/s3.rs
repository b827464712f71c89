//! S3-compatible artifact store with presigned links

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{
    Client as S3Client, error::DisplayErrorContext, operation::head_object::HeadObjectError,
    presigning::PresigningConfig, primitives::ByteStream,
};
use bytes::Bytes;
use recite_config::S3StorageConfig;
use url::Url;

use super::ArtifactStore;
use crate::{
    aws::{AwsSettings, load_sdk_config},
    error::TtsError,
};

pub struct S3Store {
    client: S3Client,
    bucket: String,
}

impl S3Store {
    pub async fn new(config: &S3StorageConfig) -> Self {
        let sdk_config = load_sdk_config(AwsSettings {
            region: &config.region,
            access_key_id: config.access_key_id.as_ref(),
            secret_access_key: config.secret_access_key.as_ref(),
            endpoint_url: config.endpoint_url.as_ref(),
        })
        .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        Self::from_client(S3Client::from_conf(s3_config), config.bucket.clone())
    }

    pub const fn from_client(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ArtifactStore for S3Store {
    async fn exists(&self, path: &str) -> crate::error::Result<bool> {
        match self.client.head_object().bucket(&self.bucket).key(path).send().await {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(HeadObjectError::is_not_found) => Ok(false),
            Err(e) => Err(TtsError::StoreReadFailed {
                path: path.to_owned(),
                message: DisplayErrorContext(&e).to_string(),
            }),
        }
    }

    async fn write(&self, path: &str, bytes: Bytes, content_type: &str) -> crate::error::Result<()> {
        let len = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| TtsError::StoreWriteFailed {
                path: path.to_owned(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        tracing::trace!(bucket = %self.bucket, path, bytes = len, "artifact uploaded");

        Ok(())
    }

    async fn issue_link(&self, path: &str, ttl: Duration) -> crate::error::Result<Url> {
        let link_failed = |message: String| TtsError::StoreLinkFailed {
            path: path.to_owned(),
            message,
        };

        let presigning = PresigningConfig::expires_in(ttl).map_err(|e| link_failed(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .presigned(presigning)
            .await
            .map_err(|e| link_failed(DisplayErrorContext(&e).to_string()))?;

        Url::parse(request.uri()).map_err(|e| link_failed(e.to_string()))
    }

    fn name(&self) -> &str {
        "s3"
    }
}
