//! Configuration loading utilities

use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::{Config, Settings};

/// Environment variable pointing at a YAML configuration file.
pub const CONFIG_PATH_VAR: &str = "TALLY_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading a configuration file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    Missing(String),

    /// A value is present but unusable
    #[error("Invalid value for {field}: {message}")]
    Invalid { field: String, message: String },

    /// Skip-lines file could not be read
    #[error("Failed to load skip lines: {0}")]
    SkipLines(#[from] tally_common::TallyError),
}

impl From<ConfigError> for tally_common::TallyError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source("could not load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        info!("Loaded configuration from {}", path.display());

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    /// Locate the configuration, apply overrides, validate, and resolve it.
    ///
    /// Lookup order is `TALLY_CONFIG_PATH`, then `config.yaml`, then
    /// `config.yml`, then built-in defaults. Environment variables always win.
    pub fn load() -> Result<Settings, ConfigError> {
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            debug!("No configuration file found, using defaults and environment");
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate()?;
            config
        };

        Settings::resolve(config)
    }

    /// Load and resolve configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
        Settings::resolve(Self::load_config(path)?)
    }

    /// Apply process environment overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("DISCORD_TOKEN") {
            config.discord.token = token;
        }

        if let Some(channel) = lookup("COMMAND_CHANNEL") {
            config.discord.command_channel = channel.trim().trim_start_matches('#').to_string();
        }

        if let Some(prefix) = lookup("TALLY_COMMAND_PREFIX") {
            config.discord.command_prefix = prefix;
        }

        if let Some(path) = lookup("SKIP_LINES_FILE") {
            config.counting.skip_lines_file = if path.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }

        if let Some(timezone) = lookup("TALLY_TIMEZONE") {
            config.counting.timezone = timezone;
        }

        if let Some(width) = lookup("TALLY_CHART_WIDTH") {
            config.chart.width = parse_var("TALLY_CHART_WIDTH", &width)?;
        }

        if let Some(height) = lookup("TALLY_CHART_HEIGHT") {
            config.chart.height = parse_var("TALLY_CHART_HEIGHT", &height)?;
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::EnvParse {
        var: var.to_string(),
        source: Box::new(e),
    })
}
