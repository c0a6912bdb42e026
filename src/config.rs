use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::MatchThresholds;
use crate::services::NameColumns;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_subject_column")]
    pub subject_column: String,
    #[serde(default = "default_reference_column")]
    pub reference_column: String,
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            subject_column: default_subject_column(),
            reference_column: default_reference_column(),
            max_rows: default_max_rows(),
        }
    }
}

impl MatchingSettings {
    pub fn columns(&self) -> NameColumns {
        NameColumns::new(self.subject_column.trim(), self.reference_column.trim())
    }
}

fn default_subject_column() -> String { "farmerName".to_string() }
fn default_reference_column() -> String { "pfmsFarmerName".to_string() }
fn default_max_rows() -> usize { 50_000 }

/// Decision thresholds (0-100 score scale)
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_main_threshold")]
    pub main: f64,
    #[serde(default = "default_loose_threshold")]
    pub loose: f64,
    #[serde(default = "default_partial_threshold")]
    pub partial: f64,
    #[serde(default = "default_set_threshold")]
    pub set: f64,
    #[serde(default = "default_token_threshold")]
    pub token: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            main: default_main_threshold(),
            loose: default_loose_threshold(),
            partial: default_partial_threshold(),
            set: default_set_threshold(),
            token: default_token_threshold(),
        }
    }
}

impl From<&ThresholdsConfig> for MatchThresholds {
    fn from(config: &ThresholdsConfig) -> Self {
        Self {
            main: config.main,
            loose: config.loose,
            partial: config.partial,
            set: config.set,
            token: config.token,
        }
    }
}

fn default_main_threshold() -> f64 { 70.0 }
fn default_loose_threshold() -> f64 { 60.0 }
fn default_partial_threshold() -> f64 { 70.0 }
fn default_set_threshold() -> f64 { 80.0 }
fn default_token_threshold() -> f64 { 60.0 }

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
    /// 4. Environment variables (prefixed with NAMERECON_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., NAMERECON__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("NAMERECON")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
