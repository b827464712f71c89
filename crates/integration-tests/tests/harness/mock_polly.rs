//! Mock Polly backend for integration tests
//!
//! Answers `SynthesizeSpeech` with canned audio bytes or a newline-delimited
//! speech-mark stream, and records every request body.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// Audio bytes returned for every audio request
pub const MOCK_AUDIO: &[u8] = b"ID3\x04mock-audio";

/// Speech marks returned for every marks request
pub const MOCK_MARKS: &str = concat!(
    r#"{"time":6,"type":"word","start":0,"end":5,"value":"hello"}"#,
    "\n",
    r#"{"time":412,"type":"word","start":6,"end":11,"value":"world"}"#,
    "\n",
);

/// Mock Polly backend that returns predictable responses
pub struct MockPolly {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockPollyState>,
}

struct MockPollyState {
    call_count: AtomicUsize,
    /// 1-based index of the call that fails (0 = never fail)
    fail_call: usize,
    requests: Mutex<Vec<serde_json::Value>>,
}

impl MockPolly {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(0).await
    }

    /// Start a mock server whose `n`th call fails with 500
    pub async fn start_failing_call(n: usize) -> anyhow::Result<Self> {
        Self::start_inner(n).await
    }

    async fn start_inner(fail_call: usize) -> anyhow::Result<Self> {
        let state = Arc::new(MockPollyState {
            call_count: AtomicUsize::new(0),
            fail_call,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/speech", routing::post(handle_synthesize_speech))
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

    /// Endpoint URL to configure as the Polly endpoint override
    pub fn endpoint_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of `SynthesizeSpeech` calls received
    pub fn call_count(&self) -> usize {
        self.state.call_count.load(Ordering::SeqCst)
    }

    /// Request bodies received, in order
    pub fn requests(&self) -> Vec<serde_json::Value> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockPolly {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_synthesize_speech(State(state): State<Arc<MockPollyState>>, body: Bytes) -> Response {
    let call = state.call_count.fetch_add(1, Ordering::SeqCst) + 1;
    let request: serde_json::Value = serde_json::from_slice(&body).unwrap_or_default();
    let output_format = request["OutputFormat"].as_str().unwrap_or_default().to_owned();

    state.requests.lock().unwrap().push(request);

    if call == state.fail_call {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("x-amzn-errortype", "ServiceFailureException")],
            r#"{"message":"mock failure"}"#,
        )
            .into_response();
    }

    if output_format == "json" {
        ([(header::CONTENT_TYPE, "application/x-json-stream")], MOCK_MARKS).into_response()
    } else {
        ([(header::CONTENT_TYPE, "audio/mpeg")], MOCK_AUDIO).into_response()
    }
}
