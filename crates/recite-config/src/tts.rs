use std::time::Duration;

use serde::Deserialize;

/// Caching, link and voice settings for speech requests
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Namespace prepended to every artifact path
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Validity window of issued artifact links (e.g. "60s", "5m")
    #[serde(default = "default_link_ttl", deserialize_with = "duration_str::deserialize_duration")]
    pub link_ttl: Duration,
    /// Longest accepted request text, in characters
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
    /// Serialize concurrent misses for the same text within this process
    #[serde(default)]
    pub single_flight: bool,
    /// Voice shared by the audio and speech-mark synthesis calls
    #[serde(default)]
    pub voice: VoiceConfig,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            link_ttl: default_link_ttl(),
            max_text_length: default_max_text_length(),
            single_flight: false,
            voice: VoiceConfig::default(),
        }
    }
}

fn default_key_prefix() -> String {
    "tts/".to_owned()
}

const fn default_link_ttl() -> Duration {
    Duration::from_secs(60)
}

const fn default_max_text_length() -> usize {
    3000
}

/// Voice identity and output settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceConfig {
    /// Backend voice identifier (e.g. "Joey")
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    /// Synthesis engine tier
    #[serde(default)]
    pub engine: Engine,
    /// Encoding of the audio artifact
    #[serde(default)]
    pub audio_format: AudioFormat,
    /// Language override for bilingual voices (e.g. "en-US")
    #[serde(default)]
    pub language_code: Option<String>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            voice_id: default_voice_id(),
            engine: Engine::default(),
            audio_format: AudioFormat::default(),
            language_code: None,
        }
    }
}

fn default_voice_id() -> String {
    "Joey".to_owned()
}

/// Synthesis engine tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Engine {
    Standard,
    #[default]
    Neural,
    LongForm,
    Generative,
}

impl Engine {
    /// Wire name understood by the backend
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Neural => "neural",
            Self::LongForm => "long-form",
            Self::Generative => "generative",
        }
    }
}

/// Audio artifact encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    #[default]
    Mp3,
    OggVorbis,
    Pcm,
}

impl AudioFormat {
    /// Wire name understood by the backend
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::OggVorbis => "ogg_vorbis",
            Self::Pcm => "pcm",
        }
    }

    /// File extension of the stored artifact
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::OggVorbis => "ogg",
            Self::Pcm => "pcm",
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::OggVorbis => "audio/ogg",
            Self::Pcm => "audio/pcm",
        }
    }
}
