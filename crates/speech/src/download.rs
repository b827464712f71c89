use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{artifact::content_type_for, error::TtsError, request::ExtractQuery, server::Server};

/// Query parameters of a signed artifact link
#[derive(Debug, Deserialize)]
pub(crate) struct LinkParams {
    expires: Option<u64>,
    signature: Option<String>,
}

/// Serve a locally stored artifact after checking its link signature
pub(crate) async fn download(
    State(server): State<Arc<Server>>,
    Path(path): Path<String>,
    ExtractQuery(params): ExtractQuery<LinkParams>,
) -> crate::error::Result<Response> {
    let Some(artifacts) = server.local_artifacts() else {
        return Err(TtsError::ArtifactNotFound(path));
    };

    let (Some(expires), Some(signature)) = (params.expires, params.signature) else {
        return Err(TtsError::LinkRejected("missing link signature"));
    };

    artifacts.signer().verify(&path, expires, &signature)?;

    let bytes = artifacts
        .read(&path)
        .await?
        .ok_or_else(|| TtsError::ArtifactNotFound(path.clone()))?;

    tracing::debug!(path = %path, bytes = bytes.len(), "serving artifact");

    Ok(([(http::header::CONTENT_TYPE, content_type_for(&path))], bytes).into_response())
}
