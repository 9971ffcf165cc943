//! Configuration for the spanbase pagination engine.
//!
//! Values are plain serde structs so they can be embedded in a larger
//! service config or loaded standalone from TOML.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// Default upper bound for `first` / `last`.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 10_000;

/// Default number of parent queries one indirect page may issue.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Default parent batch size used by indirect retries after the first attempt.
pub const DEFAULT_AMPLIFIED_BATCH_SIZE: u32 = 1_000;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}

impl ConfigError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

///
/// PaginationConfig
///
/// Engine-wide limits applied to every paginated listing.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    /// Largest accepted `first` / `last` value.
    pub max_page_size: u32,

    /// Retry budget for representative-child pagination.
    pub indirect: IndirectConfig,
}

impl PaginationConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse, and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Reject limits that would make every request fail or loop without progress.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 {
            return Err(ConfigError::invalid("max_page_size must be positive"));
        }

        self.indirect.validate()
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            indirect: IndirectConfig::default(),
        }
    }
}

///
/// IndirectConfig
///
/// Bounds for the parent-scanning loop behind representative-child pages.
/// The first attempt scans `requested` parents; later attempts scan
/// `max(requested, amplified_batch_size)`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndirectConfig {
    pub max_attempts: u32,
    pub amplified_batch_size: u32,
}

impl IndirectConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::invalid("indirect.max_attempts must be at least 1"));
        }
        if self.amplified_batch_size == 0 {
            return Err(ConfigError::invalid(
                "indirect.amplified_batch_size must be positive",
            ));
        }

        Ok(())
    }

    /// Parent batch size for one zero-based attempt.
    #[must_use]
    pub fn batch_size(&self, attempt: u32, requested: u32) -> u32 {
        if attempt == 0 {
            requested
        } else {
            requested.max(self.amplified_batch_size)
        }
    }
}

impl Default for IndirectConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            amplified_batch_size: DEFAULT_AMPLIFIED_BATCH_SIZE,
        }
    }
}

///
/// TESTS
///
