//! Artifact store rooted at a local directory

use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use super::{ArtifactStore, LinkSigner, LocalArtifacts};
use crate::error::TtsError;

/// Suffix counter so concurrent writers never share a temp file
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Stores each artifact as a file under `root`
///
/// Writes land in a temp file that is renamed into place, so readers see either
/// the previous object or the complete new one.
pub struct FilesystemStore {
    root: PathBuf,
    signer: LinkSigner,
}

impl FilesystemStore {
    pub fn new(root: impl Into<PathBuf>, signer: LinkSigner) -> Self {
        Self {
            root: root.into(),
            signer,
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, String> {
        let relative = Path::new(path);

        if path.is_empty() || !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err("artifact path must be relative and must not traverse".to_owned());
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ArtifactStore for FilesystemStore {
    async fn exists(&self, path: &str) -> crate::error::Result<bool> {
        let read_failed = |message: String| TtsError::StoreReadFailed {
            path: path.to_owned(),
            message,
        };

        let full = self.resolve(path).map_err(read_failed)?;

        tokio::fs::try_exists(&full)
            .await
            .map_err(|e| read_failed(e.to_string()))
    }

    async fn write(&self, path: &str, bytes: Bytes, _content_type: &str) -> crate::error::Result<()> {
        let write_failed = |message: String| TtsError::StoreWriteFailed {
            path: path.to_owned(),
            message,
        };

        let full = self.resolve(path).map_err(write_failed)?;
        let parent = full.parent().unwrap_or(&self.root);

        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| write_failed(e.to_string()))?;

        let file_name = full.file_name().and_then(|n| n.to_str()).unwrap_or("artifact");
        let temp = parent.join(format!(
            ".{file_name}.{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        if let Err(e) = replace(&temp, &full, &bytes).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(write_failed(e.to_string()));
        }

        tracing::trace!(path, bytes = bytes.len(), "artifact written");

        Ok(())
    }

    async fn issue_link(&self, path: &str, ttl: Duration) -> crate::error::Result<Url> {
        self.resolve(path).map_err(|message| TtsError::StoreLinkFailed {
            path: path.to_owned(),
            message,
        })?;

        Ok(self.signer.sign(path, ttl))
    }

    fn name(&self) -> &str {
        "filesystem"
    }
}

/// Write `bytes` to `temp` and move it over `full`
async fn replace(temp: &Path, full: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(temp, bytes).await?;
    tokio::fs::rename(temp, full).await
}

#[async_trait]
impl LocalArtifacts for FilesystemStore {
    async fn read(&self, path: &str) -> crate::error::Result<Option<Bytes>> {
        let Ok(full) = self.resolve(path) else {
            return Ok(None);
        };

        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(Some(Bytes::from(bytes))),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => Ok(None),
            Err(e) => Err(TtsError::StoreReadFailed {
                path: path.to_owned(),
                message: e.to_string(),
            }),
        }
    }

    fn signer(&self) -> &LinkSigner {
        &self.signer
    }
}
