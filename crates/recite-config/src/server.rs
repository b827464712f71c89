use std::net::SocketAddr;

use serde::Deserialize;
use url::Url;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Externally reachable base URL, used when this service signs its own artifact links
    #[serde(default)]
    pub public_url: Option<Url>,
    #[serde(default)]
    pub health: HealthConfig,
}

impl ServerConfig {
    /// Address to bind when none is configured
    pub const DEFAULT_LISTEN_ADDRESS: ([u8; 4], u16) = ([0, 0, 0, 0], 3000);

    /// Resolved listen address
    pub fn listen_address(&self) -> SocketAddr {
        self.listen_address
            .unwrap_or_else(|| SocketAddr::from(Self::DEFAULT_LISTEN_ADDRESS))
    }

    /// Base URL for locally signed links
    ///
    /// Falls back to `http://localhost:{port}` when `public_url` is unset.
    pub fn public_url(&self) -> Url {
        self.public_url.clone().unwrap_or_else(|| {
            let port = self.listen_address().port();
            Url::parse(&format!("http://localhost:{port}")).expect("localhost URL is always valid")
        })
    }
}

/// Health check endpoint configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: default_path(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "/health".to_owned()
}
