use recite_config::AudioFormat;

use crate::fingerprint::ContentKey;

/// Storage locations of the audio and speech-mark artifacts for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPair {
    pub voice: String,
    pub marks: String,
}

impl ArtifactPair {
    pub fn new(prefix: &str, key: &ContentKey, format: AudioFormat) -> Self {
        Self {
            voice: format!("{prefix}{key}-voice.{}", format.extension()),
            marks: format!("{prefix}{key}-marks.json"),
        }
    }
}

/// Content type for a stored artifact, derived from its extension
pub fn content_type_for(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("json") => "application/json",
        Some("mp3") => AudioFormat::Mp3.content_type(),
        Some("ogg") => AudioFormat::OggVorbis.content_type(),
        Some("pcm") => AudioFormat::Pcm.content_type(),
        _ => "application/octet-stream",
    }
}
