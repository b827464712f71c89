use std::sync::Arc;

use recite_config::{Config, StorageConfig, SynthesisConfig};

use crate::{
    cache::SpeechCache,
    error::TtsError,
    store::{
        ArtifactStore, LinkSigner, LocalArtifacts, filesystem::FilesystemStore, memory::MemoryStore, s3::S3Store,
    },
    synthesis::{SpeechSynthesizer, polly::PollySynthesizer},
    types::{SpeechRequest, SpeechResponse},
};

/// Speech service shared by the request handlers
pub struct Server {
    cache: SpeechCache,
    max_text_length: usize,
    local_artifacts: Option<Arc<dyn LocalArtifacts>>,
}

impl Server {
    /// Validate a request and resolve it against the artifact cache
    pub async fn speak(&self, request: &SpeechRequest) -> crate::error::Result<SpeechResponse> {
        let text = request.validated_text(self.max_text_length)?;
        let resolution = self.cache.resolve(text).await?;

        Ok(SpeechResponse {
            links: resolution.links,
            status: resolution.status,
        })
    }

    /// Store backing the artifact download route, if links are served locally
    pub fn local_artifacts(&self) -> Option<&Arc<dyn LocalArtifacts>> {
        self.local_artifacts.as_ref()
    }
}

type Stores = (Arc<dyn ArtifactStore>, Option<Arc<dyn LocalArtifacts>>);

/// Builder for constructing the speech server from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a Config,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    stores: Option<Stores>,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a Config) -> Self {
        Self {
            config,
            synthesizer: None,
            stores: None,
        }
    }

    /// Use `synthesizer` instead of the configured backend
    #[must_use]
    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Use `store` instead of the configured backend
    #[must_use]
    pub fn with_store<T>(mut self, store: Arc<T>) -> Self
    where
        T: ArtifactStore + LocalArtifacts + 'static,
    {
        self.stores = Some((Arc::clone(&store) as Arc<dyn ArtifactStore>, Some(store as Arc<dyn LocalArtifacts>)));
        self
    }

    pub async fn build(self) -> crate::error::Result<Server> {
        let synthesizer = match self.synthesizer {
            Some(synthesizer) => synthesizer,
            None => build_synthesizer(&self.config.synthesis).await,
        };

        let (store, local_artifacts) = match self.stores {
            Some(stores) => stores,
            None => build_stores(self.config).await?,
        };

        tracing::debug!(
            synthesizer = synthesizer.name(),
            store = store.name(),
            single_flight = self.config.tts.single_flight,
            "speech server initialized"
        );

        Ok(Server {
            cache: SpeechCache::new(synthesizer, store, self.config.tts.clone()),
            max_text_length: self.config.tts.max_text_length,
            local_artifacts,
        })
    }
}

async fn build_synthesizer(config: &SynthesisConfig) -> Arc<dyn SpeechSynthesizer> {
    match config {
        SynthesisConfig::Polly(polly) => {
            tracing::debug!(region = %polly.region, "initializing polly synthesizer");
            Arc::new(PollySynthesizer::new(polly).await)
        }
    }
}

async fn build_stores(config: &Config) -> crate::error::Result<Stores> {
    match &config.storage {
        StorageConfig::Memory(memory) => {
            let signer = LinkSigner::new(memory.signing_key.clone(), config.server.public_url());
            let store = Arc::new(MemoryStore::new(signer));

            Ok((Arc::clone(&store) as Arc<dyn ArtifactStore>, Some(store as Arc<dyn LocalArtifacts>)))
        }
        StorageConfig::Filesystem(filesystem) => {
            tokio::fs::create_dir_all(&filesystem.root).await.map_err(|e| {
                TtsError::Config(format!(
                    "failed to create storage root '{}': {e}",
                    filesystem.root.display()
                ))
            })?;

            let signer = LinkSigner::new(filesystem.signing_key.clone(), config.server.public_url());
            let store = Arc::new(FilesystemStore::new(filesystem.root.clone(), signer));

            Ok((Arc::clone(&store) as Arc<dyn ArtifactStore>, Some(store as Arc<dyn LocalArtifacts>)))
        }
        StorageConfig::S3(s3) => {
            tracing::debug!(bucket = %s3.bucket, region = %s3.region, "initializing s3 store");
            Ok((Arc::new(S3Store::new(s3).await) as Arc<dyn ArtifactStore>, None))
        }
    }
}
