use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use recite_core::{ErrorResponse, HttpError};
use thiserror::Error;

use crate::synthesis::SynthesisMode;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Message returned to callers for every downstream failure
const SERVER_ERROR_MESSAGE: &str = "server error";

/// Failures of the speech pipeline, tagged by the stage that failed
#[derive(Debug, Error)]
pub enum TtsError {
    /// Required input missing, empty or out of bounds
    #[error("{0}")]
    InvalidRequest(String),

    /// The synthesis backend errored or returned an unusable stream
    #[error("{mode} synthesis failed: {message}")]
    SynthesisFailed { mode: SynthesisMode, message: String },

    /// Existence check against the artifact store failed
    #[error("failed to check artifact {path}: {message}")]
    StoreReadFailed { path: String, message: String },

    /// Artifact write failed
    #[error("failed to write artifact {path}: {message}")]
    StoreWriteFailed { path: String, message: String },

    /// Access link could not be issued
    #[error("failed to issue link for {path}: {message}")]
    StoreLinkFailed { path: String, message: String },

    /// Speech-mark stream could not be turned into a JSON array
    #[error("speech marks normalization failed: {0}")]
    NormalizationFailed(String),

    /// Backend construction failed
    #[error("configuration error: {0}")]
    Config(String),

    /// Signed artifact link is invalid or expired
    #[error("link rejected: {0}")]
    LinkRejected(&'static str),

    /// Signed artifact link points at nothing
    #[error("artifact not found: {0}")]
    ArtifactNotFound(String),
}

impl HttpError for TtsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::LinkRejected(_) => StatusCode::FORBIDDEN,
            Self::ArtifactNotFound(_) => StatusCode::NOT_FOUND,
            Self::SynthesisFailed { .. }
            | Self::StoreReadFailed { .. }
            | Self::StoreWriteFailed { .. }
            | Self::StoreLinkFailed { .. }
            | Self::NormalizationFailed(_)
            | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::LinkRejected(_) => "permission_error",
            Self::ArtifactNotFound(_) => "not_found_error",
            Self::SynthesisFailed { .. } => "synthesis_error",
            Self::StoreReadFailed { .. } | Self::StoreWriteFailed { .. } | Self::StoreLinkFailed { .. } => {
                "storage_error"
            }
            Self::NormalizationFailed(_) => "normalization_error",
            Self::Config(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest(message) => message.clone(),
            Self::LinkRejected(reason) => (*reason).to_owned(),
            Self::ArtifactNotFound(_) => "artifact not found".to_owned(),
            _ => SERVER_ERROR_MESSAGE.to_owned(),
        }
    }
}

impl IntoResponse for TtsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_client_error() {
            tracing::debug!(error = %self, status = status.as_u16(), "rejected speech request");
        } else {
            tracing::error!(error = %self, error_type = self.error_type(), "speech request failed");
        }

        (status, Json(ErrorResponse::from_error(&self))).into_response()
    }
}
