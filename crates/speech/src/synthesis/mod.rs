pub mod polly;

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use recite_config::VoiceConfig;

/// Which output a synthesis call produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisMode {
    /// Encoded audio stream
    Audio,
    /// Newline-delimited word-level speech marks
    Marks,
}

impl fmt::Display for SynthesisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Audio => "audio",
            Self::Marks => "marks",
        })
    }
}

/// Speech synthesis backend
///
/// Audio and speech marks are separate invocations. Callers pass the same
/// `voice` to both so mark offsets line up with the audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` in the requested `mode`
    async fn synthesize(&self, text: &str, mode: SynthesisMode, voice: &VoiceConfig) -> crate::error::Result<Bytes>;

    /// Backend name for logs
    fn name(&self) -> &str;
}
