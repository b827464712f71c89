//! Mock S3 backend for integration tests
//!
//! Serves `HeadObject` and `PutObject` on path-style `/{bucket}/{key}` URLs
//! from an in-memory object map.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// Bucket name the mock expects in every request path
pub const MOCK_BUCKET: &str = "speech-artifacts";

/// An object uploaded through `PutObject`
#[derive(Clone, Debug)]
pub struct StoredObject {
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Mock S3 backend holding objects in memory
pub struct MockS3 {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockS3State>,
}

#[derive(Default)]
struct MockS3State {
    objects: Mutex<HashMap<String, StoredObject>>,
    fail_head: AtomicBool,
    heads: Mutex<Vec<String>>,
}

impl MockS3 {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockS3State::default());

        let app = Router::new()
            .route(
                "/{bucket}/{*key}",
                routing::head(handle_head_object).put(handle_put_object),
            )
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Endpoint URL to configure as the S3 endpoint override
    pub fn endpoint_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer every `HeadObject` with 500
    pub fn fail_head(&self) {
        self.state.fail_head.store(true, Ordering::SeqCst);
    }

    /// Seed an object as if it had been uploaded earlier
    pub fn insert(&self, key: &str, body: &'static [u8]) {
        self.state.objects.lock().unwrap().insert(
            key.to_owned(),
            StoredObject {
                content_type: None,
                body: Bytes::from_static(body),
            },
        );
    }

    /// Object stored under `key`, if any
    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.state.objects.lock().unwrap().get(key).cloned()
    }

    /// Number of stored objects
    pub fn object_count(&self) -> usize {
        self.state.objects.lock().unwrap().len()
    }

    /// Keys probed with `HeadObject`, in order
    pub fn heads(&self) -> Vec<String> {
        self.state.heads.lock().unwrap().clone()
    }
}

impl Drop for MockS3 {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_head_object(
    State(state): State<Arc<MockS3State>>,
    Path((bucket, key)): Path<(String, String)>,
) -> Response {
    state.heads.lock().unwrap().push(key.clone());

    if state.fail_head.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    if bucket != MOCK_BUCKET {
        return StatusCode::NOT_FOUND.into_response();
    }

    match state.objects.lock().unwrap().get(&key) {
        Some(object) => (
            StatusCode::OK,
            [
                (header::CONTENT_LENGTH, object.body.len().to_string()),
                (header::ETAG, "\"mock-etag\"".to_owned()),
            ],
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn handle_put_object(
    State(state): State<Arc<MockS3State>>,
    Path((bucket, key)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if bucket != MOCK_BUCKET {
        return StatusCode::NOT_FOUND.into_response();
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    state
        .objects
        .lock()
        .unwrap()
        .insert(key, StoredObject { content_type, body });

    (StatusCode::OK, [(header::ETAG, "\"mock-etag\"")]).into_response()
}
