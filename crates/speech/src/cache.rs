use std::sync::Arc;

use bytes::Bytes;
use recite_config::TtsConfig;

use crate::{
    artifact::ArtifactPair,
    fingerprint::ContentKey,
    locks::KeyLocks,
    marks,
    store::ArtifactStore,
    synthesis::{SpeechSynthesizer, SynthesisMode},
    types::{CacheStatus, SpeechLinks},
};

/// Outcome of a resolved speech request
#[derive(Debug)]
pub struct Resolution {
    pub key: ContentKey,
    pub status: CacheStatus,
    pub links: SpeechLinks,
}

/// Read-through cache of synthesized speech, addressed by text content
///
/// Artifacts are written once per key and reused by every later request for the
/// same text. The pair counts as cached only when both objects exist.
pub struct SpeechCache {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    store: Arc<dyn ArtifactStore>,
    config: TtsConfig,
    locks: Option<KeyLocks>,
}

impl SpeechCache {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, store: Arc<dyn ArtifactStore>, config: TtsConfig) -> Self {
        let locks = config.single_flight.then(KeyLocks::new);

        Self {
            synthesizer,
            store,
            config,
            locks,
        }
    }

    /// Return links to the artifacts for `text`, synthesizing them on a miss
    pub async fn resolve(&self, text: &str) -> crate::error::Result<Resolution> {
        let key = ContentKey::of(text);
        let pair = ArtifactPair::new(&self.config.key_prefix, &key, self.config.voice.audio_format);

        let status = if self.is_cached(&pair).await? {
            CacheStatus::Hit
        } else {
            self.fill(text, &key, &pair).await?
        };

        let links = self.issue_links(&pair).await?;

        tracing::debug!(%key, status = status.as_str(), "speech resolved");

        Ok(Resolution { key, status, links })
    }

    async fn fill(&self, text: &str, key: &ContentKey, pair: &ArtifactPair) -> crate::error::Result<CacheStatus> {
        let Some(locks) = &self.locks else {
            self.populate(text, key, pair).await?;
            return Ok(CacheStatus::Miss);
        };

        let _guard = locks.acquire(key.as_str()).await;

        // A previous holder may have produced the pair while we waited
        if self.is_cached(pair).await? {
            tracing::debug!(%key, "artifacts produced by a concurrent request");
            return Ok(CacheStatus::Hit);
        }

        self.populate(text, key, pair).await?;
        Ok(CacheStatus::Miss)
    }

    async fn is_cached(&self, pair: &ArtifactPair) -> crate::error::Result<bool> {
        let (voice, marks) = tokio::try_join!(self.store.exists(&pair.voice), self.store.exists(&pair.marks))?;

        if voice != marks {
            tracing::warn!(
                voice_path = %pair.voice,
                voice,
                marks,
                "incomplete artifact pair, synthesizing again"
            );
        }

        Ok(voice && marks)
    }

    async fn populate(&self, text: &str, key: &ContentKey, pair: &ArtifactPair) -> crate::error::Result<()> {
        let voice = &self.config.voice;

        tracing::info!(
            %key,
            synthesizer = self.synthesizer.name(),
            store = self.store.name(),
            "cache miss"
        );

        let audio = self.synthesizer.synthesize(text, SynthesisMode::Audio, voice).await?;
        let raw_marks = self.synthesizer.synthesize(text, SynthesisMode::Marks, voice).await?;
        let marks = marks::normalize_stream(&raw_marks)?;

        let audio_len = audio.len();
        self.store
            .write(&pair.voice, audio, voice.audio_format.content_type())
            .await?;
        self.store
            .write(&pair.marks, Bytes::from(marks), "application/json")
            .await?;

        tracing::debug!(%key, bytes = audio_len, "artifacts stored");

        Ok(())
    }

    async fn issue_links(&self, pair: &ArtifactPair) -> crate::error::Result<SpeechLinks> {
        let ttl = self.config.link_ttl;

        let (voice, marks) = tokio::try_join!(
            self.store.issue_link(&pair.voice, ttl),
            self.store.issue_link(&pair.marks, ttl)
        )?;

        Ok(SpeechLinks {
            voice: voice.into(),
            marks: marks.into(),
        })
    }
}
