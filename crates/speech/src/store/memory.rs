//! In-process artifact store
//!
//! Objects live for the lifetime of the process. Links are signed and served
//! by the artifact route.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use url::Url;

use super::{ArtifactStore, LinkSigner, LocalArtifacts};

pub struct MemoryStore {
    objects: DashMap<String, Bytes>,
    signer: LinkSigner,
}

impl MemoryStore {
    pub fn new(signer: LinkSigner) -> Self {
        Self {
            objects: DashMap::new(),
            signer,
        }
    }

    /// Stored paths in lexical order
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.objects.iter().map(|entry| entry.key().clone()).collect();
        paths.sort();
        paths
    }

    /// Drop the object at `path`
    pub fn remove(&self, path: &str) -> Option<Bytes> {
        self.objects.remove(path).map(|(_, bytes)| bytes)
    }
}

#[async_trait]
impl ArtifactStore for MemoryStore {
    async fn exists(&self, path: &str) -> crate::error::Result<bool> {
        Ok(self.objects.contains_key(path))
    }

    async fn write(&self, path: &str, bytes: Bytes, _content_type: &str) -> crate::error::Result<()> {
        self.objects.insert(path.to_owned(), bytes);
        Ok(())
    }

    async fn issue_link(&self, path: &str, ttl: Duration) -> crate::error::Result<Url> {
        Ok(self.signer.sign(path, ttl))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[async_trait]
impl LocalArtifacts for MemoryStore {
    async fn read(&self, path: &str) -> crate::error::Result<Option<Bytes>> {
        Ok(self.objects.get(path).map(|entry| entry.value().clone()))
    }

    fn signer(&self) -> &LinkSigner {
        &self.signer
    }
}
