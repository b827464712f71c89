#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod artifact;
mod aws;
mod cache;
mod download;
mod error;
pub mod fingerprint;
mod locks;
pub mod marks;
mod request;
mod server;
pub mod store;
pub mod synthesis;
mod types;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use tracing::Instrument;

pub use cache::{Resolution, SpeechCache};
pub use error::{Result, TtsError};
pub use server::{Server, TtsServerBuilder};
pub use types::{CACHE_STATUS_HEADER, CacheStatus, SpeechLinks, SpeechRequest, SpeechResponse};
use request::{ExtractPayload, ExtractQuery};

/// Build the speech server from configuration
pub async fn build_server(config: &recite_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        TtsServerBuilder::new(config)
            .build()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize speech server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for speech requests
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/v1/speech", post(speak_json).get(speak_query))
}

/// Create the router serving locally signed artifact links
pub fn artifact_router() -> Router<Arc<Server>> {
    Router::new().route("/artifacts/{*path}", get(download::download))
}

async fn speak_json(
    State(server): State<Arc<Server>>,
    ExtractPayload(request): ExtractPayload<SpeechRequest>,
) -> Result<SpeechResponse> {
    speak(&server, request).await
}

async fn speak_query(
    State(server): State<Arc<Server>>,
    ExtractQuery(request): ExtractQuery<SpeechRequest>,
) -> Result<SpeechResponse> {
    speak(&server, request).await
}

async fn speak(server: &Server, request: SpeechRequest) -> Result<SpeechResponse> {
    let span = tracing::info_span!("speech", log_level = request.log_level.as_deref().unwrap_or("default"));

    async {
        if request
            .log_level
            .as_deref()
            .is_some_and(|level| level.eq_ignore_ascii_case("debug"))
        {
            tracing::debug!(text = request.text.as_deref(), "speech request parameters");
        }

        server.speak(&request).await
    }
    .instrument(span)
    .await
}
