//! Layered configuration using Figment.
//!
//! Configuration is merged from, in increasing priority:
//! 1. built-in defaults,
//! 2. `config/mathe.toml` (optional),
//! 3. environment variables prefixed with `MATHE_`, nested with `__`.
//!
//! # Example
//! ```no_run
//! use mathe_core::config::MatheConfig;
//!
//! // MATHE_CONVERTERS__DEFAULT_MODE=warn overrides the file
//! let config = MatheConfig::load()?;
//! config.validate()?;
//! println!("Default error mode: {}", config.converters.default_mode);
//! # Ok::<(), mathe_core::error::MatheError>(())
//! ```

use crate::converters::ErrorMode;
use crate::error::{MatheError, MatheResult};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/mathe.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "MATHE_";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatheConfig {
    /// Application settings
    pub application: ApplicationConfig,
    /// Conversion defaults
    pub converters: ConverterConfig,
    /// Experiment output settings
    pub experiment: ExperimentConfig,
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Application name
    pub name: String,
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Conversion defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Error mode used when the caller does not pick one
    pub default_mode: ErrorMode,
}

/// Where and how experiment folders are created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Root directory for run folders
    pub base_path: PathBuf,
    /// Short experiment identifier
    pub tag: String,
    /// Optional version component of the folder name
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: "mathe".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("results"),
            tag: "sim".to_string(),
            version: String::new(),
        }
    }
}

impl MatheConfig {
    /// Load configuration from `config/mathe.toml` and environment variables
    pub fn load() -> MatheResult<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific file path
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from<P: AsRef<Path>>(path: P) -> MatheResult<Self> {
        let config: Self = Self::figment(path.as_ref()).extract()?;
        Ok(config)
    }

    /// The provider stack used by [`MatheConfig::load_from`].
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(MatheConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> MatheResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.application.log_level.to_lowercase().as_str()) {
            return Err(MatheError::Configuration(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.application.log_level,
                valid_levels.join(", ")
            )));
        }

        if self.experiment.tag.trim().is_empty() {
            return Err(MatheError::Configuration(
                "experiment.tag cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
