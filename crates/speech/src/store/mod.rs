pub mod filesystem;
pub mod memory;
pub mod s3;
mod signing;

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

pub use signing::LinkSigner;

/// Key-addressed blob store holding synthesized artifacts
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Whether an object is stored at `path`
    ///
    /// A missing object is `Ok(false)`, never an error.
    async fn exists(&self, path: &str) -> crate::error::Result<bool>;

    /// Store `bytes` at `path`, replacing any existing object
    async fn write(&self, path: &str, bytes: Bytes, content_type: &str) -> crate::error::Result<()>;

    /// Issue a fresh link that grants read access to `path` for `ttl`
    async fn issue_link(&self, path: &str, ttl: Duration) -> crate::error::Result<Url>;

    /// Backend name for logs
    fn name(&self) -> &str;
}

/// Store whose links point back at this service
///
/// The artifact download route verifies the signature with [`LocalArtifacts::signer`]
/// and then streams the object returned by [`LocalArtifacts::read`].
#[async_trait]
pub trait LocalArtifacts: Send + Sync {
    /// Read the object at `path`, or `None` if absent
    async fn read(&self, path: &str) -> crate::error::Result<Option<Bytes>>;

    fn signer(&self) -> &LinkSigner;
}
