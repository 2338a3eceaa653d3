//! Configuration management for dirmirror
//!
//! This crate loads the settings that shape a mirror run: which copy strategy
//! to use, how same-named files are compared, and how much to log.
//!
//! # Features
//!
//! - **Multiple formats**: YAML, TOML and JSON files, chosen by extension
//! - **Validation**: values are checked after loading
//! - **Environment overrides**: `DIRMIRROR__SECTION__KEY` variables win over the file
//! - **Defaults**: every option has a default, so a partial file is enough
//!
//! # Examples
//!
//! ```rust
//! use dirmirror_config::{Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::new()
//!     .add_defaults()
//!     .add_source_file("dirmirror.yaml")
//!     .build()
//!     .expect("Failed to load configuration");
//!
//! println!("Strategy: {:?}", config.sync.strategy);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use dirmirror_types::{ExecutionStrategy, IdentityKind};
use serde::{Deserialize, Serialize};

pub mod builder;
pub mod error;
pub mod loader;

pub use builder::ConfigBuilder;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

/// Log levels accepted by `logging.level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main configuration structure for dirmirror
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Mirror behaviour
    #[serde(default)]
    pub sync: SyncConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Mirror behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Copy as the walk goes, or plan first and report progress
    pub strategy: ExecutionStrategy,
    /// How same-named files are compared
    pub identity: IdentityKind,
    /// Copy source modification times onto copied files
    pub preserve_timestamps: bool,
    /// Log and count decisions without modifying the destination
    pub dry_run: bool,
    /// Create the destination root when it does not exist
    pub create_destination: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when neither `RUST_LOG` nor a CLI flag sets one
    pub level: String,
    /// Enable colored output
    pub colored_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            colored_output: true,
        }
    }
}
