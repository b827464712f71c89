use std::{path::Path, time::Duration};

use secrecy::ExposeSecret;

use crate::{Config, StorageConfig};

/// Longest link lifetime accepted by S3 presigning (SigV4)
const MAX_LINK_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        tracing::debug!(
            key_prefix = %config.tts.key_prefix,
            link_ttl_secs = config.tts.link_ttl.as_secs(),
            "configuration loaded"
        );

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_tts()?;
        self.validate_storage()?;
        Ok(())
    }

    fn validate_tts(&self) -> anyhow::Result<()> {
        let tts = &self.tts;

        if tts.link_ttl.is_zero() {
            anyhow::bail!("tts.link_ttl must be greater than 0");
        }

        if tts.link_ttl > MAX_LINK_TTL {
            anyhow::bail!("tts.link_ttl must not exceed 7 days");
        }

        if tts.max_text_length == 0 {
            anyhow::bail!("tts.max_text_length must be greater than 0");
        }

        let prefix = &tts.key_prefix;
        if prefix.starts_with('/') || prefix.split('/').any(|segment| segment == "..") {
            anyhow::bail!("tts.key_prefix must be a relative path without '..' segments");
        }

        if tts.voice.voice_id.trim().is_empty() {
            anyhow::bail!("tts.voice.voice_id must not be empty");
        }

        Ok(())
    }

    fn validate_storage(&self) -> anyhow::Result<()> {
        let signing_key = match &self.storage {
            StorageConfig::Memory(memory) => &memory.signing_key,
            StorageConfig::Filesystem(fs) => &fs.signing_key,
            StorageConfig::S3(s3) => {
                if s3.bucket.is_empty() {
                    anyhow::bail!("storage.bucket must not be empty");
                }
                return Ok(());
            }
        };

        if signing_key.expose_secret().is_empty() {
            anyhow::bail!("storage.signing_key must not be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::{Config, SynthesisConfig};

    const MINIMAL: &str = r#"
[synthesis]
type = "polly"
region = "us-east-1"

[storage]
type = "memory"
signing_key = "secret"
"#;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::parse(MINIMAL).unwrap();

        assert_eq!(config.tts.key_prefix, "tts/");
        assert!(config.server.health.enabled);
        assert!(config.telemetry.is_none());
        let SynthesisConfig::Polly(polly) = &config.synthesis;
        assert_eq!(polly.region, "us-east-1");
    }

    #[test]
    fn synthesis_section_is_required() {
        let err = Config::parse("[storage]\ntype = \"memory\"\nsigning_key = \"k\"").unwrap_err();
        assert!(err.to_string().contains("synthesis"));
    }

    #[test]
    fn rejects_zero_ttl() {
        let raw = format!("{MINIMAL}\n[tts]\nlink_ttl = \"0s\"\n");
        let err = Config::parse(&raw).unwrap_err();
        assert!(err.to_string().contains("link_ttl"));
    }

    #[test]
    fn rejects_ttl_beyond_presign_limit() {
        let raw = format!("{MINIMAL}\n[tts]\nlink_ttl = \"8d\"\n");
        let err = Config::parse(&raw).unwrap_err();
        assert!(err.to_string().contains("7 days"));
    }

    #[test]
    fn rejects_escaping_prefix() {
        let raw = format!("{MINIMAL}\n[tts]\nkey_prefix = \"../tts/\"\n");
        let err = Config::parse(&raw).unwrap_err();
        assert!(err.to_string().contains("key_prefix"));
    }

    #[test]
    fn rejects_empty_signing_key() {
        let raw = MINIMAL.replace("signing_key = \"secret\"", "signing_key = \"\"");
        let err = Config::parse(&raw).unwrap_err();
        assert!(err.to_string().contains("signing_key"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let raw = format!("{MINIMAL}\n[tts]\ncache_forever = true\n");
        assert!(Config::parse(&raw).is_err());
    }

    #[test]
    fn load_expands_environment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            MINIMAL.replace("signing_key = \"secret\"", "signing_key = \"{{ env.RECITE_TEST_KEY }}\"")
        )
        .unwrap();

        temp_env::with_var("RECITE_TEST_KEY", Some("from-env"), || {
            let config = Config::load(file.path()).unwrap();
            let crate::StorageConfig::Memory(memory) = &config.storage else {
                panic!("expected memory storage");
            };
            assert_eq!(secrecy::ExposeSecret::expose_secret(&memory.signing_key), "from-env");
        });
    }
}
