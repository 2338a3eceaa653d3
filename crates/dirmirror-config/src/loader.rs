//! Configuration loader utilities

use crate::{builder::ConfigBuilder, Config, ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides such as `DIRMIRROR__SYNC__DRY_RUN`
pub const ENV_PREFIX: &str = "DIRMIRROR";

/// Configuration loader with common loading patterns
#[derive(Debug)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults plus environment overrides, or a specific file when given
    pub fn load(path: Option<&Path>) -> ConfigResult<Config> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => ConfigBuilder::new()
                .add_defaults()
                .add_env_prefix(ENV_PREFIX)
                .build(),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Config> {
        ConfigBuilder::new()
            .add_defaults()
            .add_required_file(path)
            .add_env_prefix(ENV_PREFIX)
            .build()
    }

    /// Save configuration to a file, in the format given by its extension
    pub fn save_to_file<P: AsRef<Path>>(config: &Config, path: P) -> ConfigResult<()> {
        let path = path.as_ref();

        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::to_string_pretty(config)?,
            Some("json") => serde_json::to_string_pretty(config)?,
            _ => serde_yaml::to_string(config)?,
        };

        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Generate a default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> ConfigResult<PathBuf> {
        let path = path.as_ref();
        Self::save_to_file(&Config::default(), path)?;
        Ok(path.to_path_buf())
    }

    /// Validate a configuration file without using it
    pub fn validate_file<P: AsRef<Path>>(path: P) -> ConfigResult<()> {
        Self::load_from_file(path).map(|_| ())
    }
}
