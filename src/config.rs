//! Configuration for the archive tools
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (lbw.toml)
//! - Environment variables (LBW__*)
//!
//! ## Example config file (lbw.toml):
//! ```toml
//! [paths]
//! schema = "lbw_schema.json"
//! data = "data.json"
//!
//! [report]
//! format = "text"
//!
//! [selection]
//! format = "json"
//! seed = 42
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LbwConfig {
    /// Where the schema and archive live
    #[serde(default)]
    pub paths: PathsConfig,

    /// Validation report settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Random selection settings
    #[serde(default)]
    pub selection: SelectionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// JSON Schema the archive must conform to
    #[serde(default = "default_schema_path")]
    pub schema: PathBuf,

    /// Archive document
    #[serde(default = "default_data_path")]
    pub data: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_format")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_selection_format")]
    pub format: OutputFormat,

    /// Fixed RNG seed; a fresh choice every run when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// Default value functions
fn default_schema_path() -> PathBuf {
    PathBuf::from("lbw_schema.json")
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data.json")
}

fn default_report_format() -> OutputFormat {
    OutputFormat::Text
}

fn default_selection_format() -> OutputFormat {
    OutputFormat::Json
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            schema: default_schema_path(),
            data: default_data_path(),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            format: default_selection_format(),
            seed: None,
        }
    }
}

impl LbwConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a specific file on top of the default locations
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["lbw.toml", ".lbw.toml", "config/lbw.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Per-user config directory
        if let Some(dirs) = directories::ProjectDirs::from("org", "lbw", "lbw-archive") {
            let user_config = dirs.config_dir().join("lbw.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // LBW__PATHS__SCHEMA=... etc.
        builder = builder.add_source(
            Environment::with_prefix("LBW")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
