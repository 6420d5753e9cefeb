use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::error::MatchError;
use crate::models::{MatchConfig, PriorityOrder, Strategy};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }

/// Defaults for requests that omit an option
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_threshold")]
    pub default_threshold: u8,
    #[serde(default = "default_strategy")]
    pub default_strategy: String,
    /// Comma-separated axis labels, highest priority first
    #[serde(default = "default_priorities")]
    pub default_priorities: String,
    /// Largest population accepted per side
    #[serde(default = "default_max_population")]
    pub max_population: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_threshold: default_threshold(),
            default_strategy: default_strategy(),
            default_priorities: default_priorities(),
            max_population: default_max_population(),
        }
    }
}

fn default_threshold() -> u8 { 80 }
fn default_strategy() -> String { "optimal".to_string() }
fn default_priorities() -> String { "industry,role,interest,keyword".to_string() }
fn default_max_population() -> usize { 1000 }

impl MatchingSettings {
    /// Request defaults, validated the same way request options are
    pub fn match_config(&self) -> Result<MatchConfig, MatchError> {
        let strategy: Strategy = self.default_strategy.parse()?;
        let priorities: PriorityOrder = self.default_priorities.parse()?;
        MatchConfig::new(self.default_threshold, priorities, strategy)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_export_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_export_capacity")]
    pub capacity: u64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_export_ttl(),
            capacity: default_export_capacity(),
        }
    }
}

fn default_export_ttl() -> u64 { 900 }
fn default_export_capacity() -> u64 { 256 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MENTOR_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MENTOR__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MENTOR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MENTOR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Axis, PolicyKind};

    #[test]
    fn test_default_matching() {
        let config = MatchingSettings::default().match_config().unwrap();
        assert_eq!(config.threshold(), 80);
        assert_eq!(config.strategy(), Strategy::Optimal);
        assert_eq!(config.policy(), PolicyKind::PriorityWeighted);
        assert_eq!(config.priority_order().axes()[0], Axis::Industry);
    }

    #[test]
    fn test_invalid_default_priorities() {
        let settings = MatchingSettings {
            default_priorities: "industry,role".to_string(),
            ..Default::default()
        };
        assert!(settings.match_config().is_err());
    }

    #[test]
    fn test_load_shipped_defaults() {
        let settings = Settings::load_from(concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml")).unwrap();

        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.logging.format, "json");
        assert_eq!(settings.export.capacity, 256);

        let config = settings.matching.match_config().unwrap();
        assert_eq!(config.threshold(), 80);
        assert_eq!(config.strategy(), Strategy::Optimal);
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(Settings::load_from("config/does-not-exist.toml").is_err());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings: Settings = Config::builder().build().unwrap().try_deserialize().unwrap();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.export.ttl_secs, 900);
        assert_eq!(settings.matching.max_population, 1000);
    }
}
