//! Module configuration

use crate::error::Result;
use bidrules_runtime::DEFAULT_REFRESH_TTL;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Host-level settings for the rules engine module
///
/// Per-account rules come with each request; these only tune the cache
/// and the build queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Age after which a cached entry is checked against incoming config
    #[serde(default = "default_refresh_ttl_secs")]
    pub refresh_ttl_secs: u64,

    /// Capacity of the build instruction queue
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Data center this host runs in, exposed to `dataCenter` functions
    #[serde(default)]
    pub data_center: Option<String>,
}

fn default_refresh_ttl_secs() -> u64 {
    DEFAULT_REFRESH_TTL.as_secs()
}

fn default_queue_capacity() -> usize {
    128
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            refresh_ttl_secs: default_refresh_ttl_secs(),
            queue_capacity: default_queue_capacity(),
            data_center: None,
        }
    }
}

impl ModuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl_secs = ttl.as_secs();
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_data_center(mut self, data_center: impl Into<String>) -> Self {
        self.data_center = Some(data_center.into());
        self
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_ttl_secs)
    }

    /// Load from `.env`, `config/rules_engine.*` and `BIDRULES_*` variables
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::load_from(
            config::Config::builder()
                .add_source(config::File::with_name("config/rules_engine").required(false))
                .add_source(config::Environment::with_prefix("BIDRULES").try_parsing(true)),
        )
    }

    /// Load from explicit sources, falling back to defaults if they fail to build
    pub fn load_from(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        match builder.build() {
            Ok(cfg) => Ok(cfg.try_deserialize()?),
            Err(e) => {
                tracing::info!(error = %e, "No module config found, using default configuration");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn test_module_config_default() {
        let config = ModuleConfig::default();

        assert_eq!(config.refresh_ttl_secs, 300);
        assert_eq!(config.refresh_ttl(), DEFAULT_REFRESH_TTL);
        assert_eq!(config.queue_capacity, 128);
        assert!(config.data_center.is_none());
    }

    #[test]
    fn test_module_config_builders() {
        let config = ModuleConfig::new()
            .with_refresh_ttl(Duration::from_secs(30))
            .with_queue_capacity(4)
            .with_data_center("us-east");

        assert_eq!(config.refresh_ttl(), Duration::from_secs(30));
        assert_eq!(config.queue_capacity, 4);
        assert_eq!(config.data_center.as_deref(), Some("us-east"));
    }

    #[test]
    fn test_load_from_partial_source() {
        let builder = config::Config::builder()
            .add_source(File::from_str("refresh_ttl_secs = 60", FileFormat::Toml));

        let config = ModuleConfig::load_from(builder).unwrap();
        assert_eq!(config.refresh_ttl_secs, 60);
        assert_eq!(config.queue_capacity, 128);
    }

    #[test]
    fn test_load_from_full_source() {
        let source = r#"
            refresh_ttl_secs = 10
            queue_capacity = 16
            data_center = "eu-west"
        "#;
        let builder = config::Config::builder().add_source(File::from_str(source, FileFormat::Toml));

        let config = ModuleConfig::load_from(builder).unwrap();
        assert_eq!(config.refresh_ttl_secs, 10);
        assert_eq!(config.queue_capacity, 16);
        assert_eq!(config.data_center.as_deref(), Some("eu-west"));
    }

    #[test]
    fn test_load_from_rejects_bad_types() {
        let builder = config::Config::builder()
            .add_source(File::from_str("queue_capacity = \"lots\"", FileFormat::Toml));

        assert!(ModuleConfig::load_from(builder).is_err());
    }

    #[test]
    fn test_module_config_serde() {
        let config: ModuleConfig = serde_json::from_str(r#"{"data_center": "apac"}"#).unwrap();
        assert_eq!(config.refresh_ttl_secs, 300);
        assert_eq!(config.data_center.as_deref(), Some("apac"));
    }
}
