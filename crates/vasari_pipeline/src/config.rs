//! Pipeline configuration.
//!
//! TOML-based configuration with layered sources: bundled defaults
//! (include_str! from vasari.toml), a user override in
//! `~/.config/vasari/`, a `./vasari.toml` in the working directory, and
//! `VASARI__*` environment variables, later sources winning. Secrets
//! (API keys, `DATABASE_URL`) are read from the environment by the
//! components that need them, never from these files.

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use vasari_error::{ConfigError, VasariResult};

/// Settings for the conversation-style text generation service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationSettings {
    /// Base URL of the conversation API
    pub base_url: String,
    /// Generation profile producing article JSON
    pub text_profile: String,
    /// Generation profile producing image prompts
    pub image_prompt_profile: String,
    /// Seconds between run status polls
    pub poll_interval_secs: u64,
    /// Overall seconds before a pending run is abandoned
    pub poll_timeout_secs: u64,
}

impl GenerationSettings {
    /// Poll cadence as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Poll budget as a duration.
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }
}

/// Settings for the image synthesis service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageSettings {
    /// Synthesis endpoint URL
    pub endpoint: String,
    /// Fixed output dimensions, e.g. `1024x1024`
    pub size: String,
}

/// Settings for durable object storage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Storage API endpoint
    pub endpoint: String,
    /// Bucket name
    pub bucket: String,
    /// Public base URL assets resolve under
    pub public_base_url: String,
}

/// Retry bounds for the orchestrator itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetrySettings {
    /// How many times a run may re-allocate after losing a slot race
    #[serde(default = "default_max_slot_attempts")]
    pub max_slot_attempts: u32,
}

fn default_max_slot_attempts() -> u32 {
    3
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_slot_attempts: default_max_slot_attempts(),
        }
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Text generation settings
    pub generation: GenerationSettings,
    /// Image synthesis settings
    pub images: ImageSettings,
    /// Object storage settings
    pub storage: StorageSettings,
    /// Orchestrator retry bounds
    #[serde(default)]
    pub pipeline: RetrySettings,
}

impl PipelineConfig {
    /// Load configuration with the standard source layering:
    /// 1. Bundled defaults (include_str! from vasari.toml)
    /// 2. `~/.config/vasari/vasari.toml`, if present
    /// 3. `./vasari.toml`, if present
    /// 4. `VASARI__SECTION__KEY` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a source fails to parse or the merged result
    /// is missing required fields.
    pub fn load() -> VasariResult<Self> {
        const DEFAULT_CONFIG: &str = include_str!("../../../vasari.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let home_config = config_dir.join("vasari").join("vasari.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("vasari").required(false));
        builder = builder.add_source(Environment::with_prefix("VASARI").separator("__"));

        builder
            .build()
            .map_err(|e| ConfigError::new(format!("failed to load configuration: {e}")))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("invalid configuration: {e}")).into())
    }

    /// Load configuration from one explicit file, with no layering.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unparseable, or
    /// incomplete.
    pub fn load_from(path: impl AsRef<std::path::Path>) -> VasariResult<Self> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| ConfigError::new(format!("failed to load configuration: {e}")))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("invalid configuration: {e}")).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_parse() {
        const DEFAULT_CONFIG: &str = include_str!("../../../vasari.toml");
        let config: PipelineConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.generation.poll_interval(), Duration::from_secs(2));
        assert_eq!(config.generation.poll_timeout(), Duration::from_secs(120));
        assert_eq!(config.images.size, "1024x1024");
        assert_eq!(config.pipeline.max_slot_attempts, 3);
    }

    #[test]
    fn retry_settings_default_when_absent() {
        let config: PipelineConfig = Config::builder()
            .add_source(File::from_str(
                r#"
[generation]
base_url = "https://g.example.com"
text_profile = "t"
image_prompt_profile = "i"
poll_interval_secs = 1
poll_timeout_secs = 10

[images]
endpoint = "https://i.example.com"
size = "512x512"

[storage]
endpoint = "https://s.example.com"
bucket = "b"
public_base_url = "https://a.example.com"
"#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.pipeline.max_slot_attempts, 3);
    }
}
