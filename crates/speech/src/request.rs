use axum::{
    body::Body,
    extract::{FromRequest, FromRequestParts, Query},
};
use http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::TtsError;

/// Body limit for speech requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

/// Extractor for JSON request bodies
///
/// Rejections are `TtsError::InvalidRequest` so they share the error envelope.
pub struct ExtractPayload<T>(pub T);

impl<S, T: DeserializeOwned> FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
{
    type Rejection = TtsError;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        let is_json = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));

        if !is_json {
            return Err(TtsError::InvalidRequest(
                "unsupported Content-Type, expected: 'Content-Type: application/json'".to_owned(),
            ));
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
            if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
                TtsError::InvalidRequest(format!("request body is too large, limit is {BODY_LIMIT_BYTES} bytes"))
            } else {
                TtsError::InvalidRequest(format!("failed to read request body: {err}"))
            }
        })?;

        serde_json::from_slice::<T>(&bytes)
            .map(Self)
            .map_err(|e| TtsError::InvalidRequest(format!("failed to parse request body: {e}")))
    }
}

/// Extractor for query-string parameters
pub struct ExtractQuery<T>(pub T);

impl<S, T: DeserializeOwned> FromRequestParts<S> for ExtractQuery<T>
where
    S: Send + Sync,
{
    type Rejection = TtsError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|e| TtsError::InvalidRequest(e.body_text()))
    }
}
