//! Amazon Polly backend

use async_trait::async_trait;
use aws_sdk_polly::Client as PollyClient;
use aws_sdk_polly::error::DisplayErrorContext;
use aws_sdk_polly::types::{Engine, LanguageCode, OutputFormat, SpeechMarkType, VoiceId};
use bytes::Bytes;
use recite_config::{PollyConfig, VoiceConfig};

use super::{SpeechSynthesizer, SynthesisMode};
use crate::{
    aws::{AwsSettings, load_sdk_config},
    error::TtsError,
};

/// Polly-backed synthesizer
pub struct PollySynthesizer {
    client: PollyClient,
}

impl PollySynthesizer {
    /// Create from provider configuration
    pub async fn new(config: &PollyConfig) -> Self {
        let sdk_config = load_sdk_config(AwsSettings {
            region: &config.region,
            access_key_id: config.access_key_id.as_ref(),
            secret_access_key: config.secret_access_key.as_ref(),
            endpoint_url: config.endpoint_url.as_ref(),
        })
        .await;

        Self::from_client(PollyClient::new(&sdk_config))
    }

    pub const fn from_client(client: PollyClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SpeechSynthesizer for PollySynthesizer {
    async fn synthesize(&self, text: &str, mode: SynthesisMode, voice: &VoiceConfig) -> crate::error::Result<Bytes> {
        let mut call = self
            .client
            .synthesize_speech()
            .text(text)
            .voice_id(VoiceId::from(voice.voice_id.as_str()))
            .engine(Engine::from(voice.engine.as_str()));

        call = match mode {
            SynthesisMode::Audio => call.output_format(OutputFormat::from(voice.audio_format.as_str())),
            SynthesisMode::Marks => call
                .output_format(OutputFormat::Json)
                .speech_mark_types(SpeechMarkType::Word),
        };

        if let Some(language) = &voice.language_code {
            call = call.language_code(LanguageCode::from(language.as_str()));
        }

        tracing::debug!(
            %mode,
            voice_id = %voice.voice_id,
            engine = voice.engine.as_str(),
            input_len = text.len(),
            "polly synthesize_speech"
        );

        let output = call.send().await.map_err(|e| TtsError::SynthesisFailed {
            mode,
            message: DisplayErrorContext(&e).to_string(),
        })?;

        let stream = output.audio_stream.collect().await.map_err(|e| TtsError::SynthesisFailed {
            mode,
            message: format!("failed to read stream: {e}"),
        })?;

        let bytes = stream.into_bytes();

        if mode == SynthesisMode::Audio && bytes.is_empty() {
            return Err(TtsError::SynthesisFailed {
                mode,
                message: "backend returned an empty audio stream".to_owned(),
            });
        }

        tracing::debug!(%mode, bytes = bytes.len(), "polly synthesis complete");

        Ok(bytes)
    }

    fn name(&self) -> &str {
        "polly"
    }
}
