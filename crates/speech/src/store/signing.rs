use std::time::{Duration, SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use url::Url;

use crate::error::TtsError;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies HMAC-signed artifact links
///
/// Link format: `{base}/artifacts/{path}?expires={unix}&signature={hex}` where
/// the signature covers `path` and `expires`.
#[derive(Debug, Clone)]
pub struct LinkSigner {
    key: SecretString,
    base_url: Url,
}

impl LinkSigner {
    pub const fn new(key: SecretString, base_url: Url) -> Self {
        Self { key, base_url }
    }

    /// Sign a link to `path` valid for `ttl` from now
    pub fn sign(&self, path: &str, ttl: Duration) -> Url {
        self.sign_at(path, ttl, SystemTime::now())
    }

    /// Verify a link presented to the download route
    ///
    /// # Errors
    ///
    /// Returns `LinkRejected` for malformed or forged signatures and expired links
    pub fn verify(&self, path: &str, expires: u64, signature: &str) -> Result<(), TtsError> {
        self.verify_at(path, expires, signature, SystemTime::now())
    }

    fn sign_at(&self, path: &str, ttl: Duration, now: SystemTime) -> Url {
        let expires = unix_seconds(now) + ttl.as_secs().max(1);
        let signature = hex::encode(self.mac(path, expires).finalize().into_bytes());

        let mut url = self.base_url.clone();
        let base_path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{base_path}/artifacts/{path}"));
        url.query_pairs_mut()
            .clear()
            .append_pair("expires", &expires.to_string())
            .append_pair("signature", &signature);

        url
    }

    fn verify_at(&self, path: &str, expires: u64, signature: &str, now: SystemTime) -> Result<(), TtsError> {
        let signature = hex::decode(signature).map_err(|_| TtsError::LinkRejected("malformed signature"))?;

        self.mac(path, expires)
            .verify_slice(&signature)
            .map_err(|_| TtsError::LinkRejected("invalid signature"))?;

        if unix_seconds(now) > expires {
            return Err(TtsError::LinkRejected("link expired"));
        }

        Ok(())
    }

    fn mac(&self, path: &str, expires: u64) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.key.expose_secret().as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(path.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        mac
    }
}

fn unix_seconds(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}
