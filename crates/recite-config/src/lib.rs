#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod server;
pub mod storage;
pub mod synthesis;
pub mod telemetry;
pub mod tts;

use serde::Deserialize;

pub use server::*;
pub use storage::*;
pub use synthesis::*;
pub use telemetry::*;
pub use tts::*;

/// Top-level Recite configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Caching and voice settings
    #[serde(default)]
    pub tts: TtsConfig,
    /// Speech synthesis backend
    pub synthesis: SynthesisConfig,
    /// Artifact storage backend
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
