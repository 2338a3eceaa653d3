//! Configuration builder for layered configuration loading

use crate::{Config, ConfigError, ConfigResult, LOG_LEVELS};
use config::{ConfigBuilder as ConfigBuilderInner, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

/// Separator between nested keys in environment variable names
const ENV_SEPARATOR: &str = "__";

/// Configuration builder for loading configuration from multiple sources
///
/// Sources are applied in the order they were added on top of the
/// serialized defaults, so later sources win.
#[derive(Debug)]
pub struct ConfigBuilder {
    inner: ConfigBuilderInner<config::builder::DefaultState>,
    sources: Vec<ConfigSource>,
}

#[derive(Debug, Clone)]
enum ConfigSource {
    File {
        path: PathBuf,
        format: FileFormat,
        required: bool,
    },
    Defaults,
    Environment {
        prefix: String,
    },
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            inner: config::Config::builder(),
            sources: Vec::new(),
        }
    }

    /// Add default configuration values
    pub fn add_defaults(mut self) -> Self {
        self.sources.push(ConfigSource::Defaults);
        self
    }

    /// Add an optional configuration file; a missing file is ignored
    pub fn add_source_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = Self::detect_format(&path);
        self.sources.push(ConfigSource::File {
            path,
            format,
            required: false,
        });
        self
    }

    /// Add a configuration file that must exist
    pub fn add_required_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = Self::detect_format(&path);
        self.sources.push(ConfigSource::File {
            path,
            format,
            required: true,
        });
        self
    }

    /// Add environment variable source with prefix
    pub fn add_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.sources.push(ConfigSource::Environment {
            prefix: prefix.into(),
        });
        self
    }

    /// Build the configuration
    pub fn build(mut self) -> ConfigResult<Config> {
        let defaults_value = serde_yaml::to_value(Config::default())?;
        self.inner = self
            .inner
            .add_source(config::Config::try_from(&defaults_value)?);

        for source in &self.sources {
            match source {
                ConfigSource::File {
                    path,
                    format,
                    required,
                } => {
                    if *required && !path.exists() {
                        return Err(ConfigError::Io {
                            path: path.clone(),
                            source: std::io::Error::new(
                                std::io::ErrorKind::NotFound,
                                "Configuration file not found",
                            ),
                        });
                    }
                    if path.exists() {
                        self.inner = self
                            .inner
                            .add_source(File::from(path.clone()).format(*format));
                    }
                }
                ConfigSource::Environment { prefix } => {
                    self.inner = self.inner.add_source(
                        Environment::with_prefix(prefix).separator(ENV_SEPARATOR),
                    );
                }
                ConfigSource::Defaults => {
                    // Always layered first
                }
            }
        }

        let config: Config = self.inner.build()?.try_deserialize()?;
        Self::validate(&config)?;

        Ok(config)
    }

    /// Detect file format from extension
    pub(crate) fn detect_format(path: &Path) -> FileFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }

    /// Validate the configuration
    fn validate(config: &Config) -> ConfigResult<()> {
        if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!(
                    "'{}' is not one of: {}",
                    config.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
