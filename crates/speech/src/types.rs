use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::HeaderValue;
use serde::{Deserialize, Serialize};

use crate::error::TtsError;

/// Response header reporting whether artifacts were reused
pub const CACHE_STATUS_HEADER: &str = "x-recite-cache";

/// Speech request, accepted as a JSON body or query string
#[derive(Debug, Default, Deserialize)]
pub struct SpeechRequest {
    /// Text to synthesize
    #[serde(default)]
    pub text: Option<String>,
    /// Per-request log verbosity, recorded on the request span
    #[serde(default, alias = "LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl SpeechRequest {
    /// Extract the text to synthesize, rejecting missing, blank or oversized input
    pub fn validated_text(&self, max_length: usize) -> crate::error::Result<&str> {
        let Some(text) = self.text.as_deref() else {
            return Err(TtsError::InvalidRequest("missing parameter(s) 'text'".to_owned()));
        };

        if text.trim().is_empty() {
            return Err(TtsError::InvalidRequest("parameter 'text' must not be empty".to_owned()));
        }

        let length = text.chars().count();
        if length > max_length {
            return Err(TtsError::InvalidRequest(format!(
                "parameter 'text' is {length} characters, limit is {max_length}"
            )));
        }

        Ok(text)
    }
}

/// Expiring links to the audio and speech-mark artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeechLinks {
    pub voice: String,
    pub marks: String,
}

/// Whether a request reused stored artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
        }
    }
}

/// Successful speech response
pub struct SpeechResponse {
    pub links: SpeechLinks,
    pub status: CacheStatus,
}

impl IntoResponse for SpeechResponse {
    fn into_response(self) -> Response {
        let mut response = Json(self.links).into_response();
        response
            .headers_mut()
            .insert(CACHE_STATUS_HEADER, HeaderValue::from_static(self.status.as_str()));
        response
    }
}
