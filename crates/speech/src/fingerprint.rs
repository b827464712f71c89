use std::fmt;

/// Cache key derived from request text
///
/// MD5 over the UTF-8 bytes, rendered as 32 lowercase hex characters.
/// Only used for addressing, never for integrity or authentication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey(String);

impl ContentKey {
    /// Fingerprint `text`
    pub fn of(text: &str) -> Self {
        Self(format!("{:x}", md5::compute(text.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
