//! Encoder configuration
//!
//! Build with `EncoderConfig::builder().initial_capacity(...).build()`, or
//! deserialize from a host application's config file and call `validate`.

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::INITIAL_BUFFER_CAPACITY;

/// Zone used when rendering record timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZone {
    /// Coordinated Universal Time, rendered with a `Z` suffix
    #[default]
    Utc,
    /// The process-local zone, rendered with a `±HH:MM` suffix when non-zero
    Local,
}

/// Runtime parameters shared by the text and binary loggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Capacity of each newly allocated pooled buffer (bytes)
    pub initial_capacity: usize,

    /// Zone for the wall clock
    pub time_zone: TimeZone,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            initial_capacity: INITIAL_BUFFER_CAPACITY,
            time_zone: TimeZone::Utc,
        }
    }
}

impl EncoderConfig {
    /// Start building a config with defaults.
    ///
    /// Defaults:
    /// - initial_capacity = 512 bytes
    /// - time_zone        = UTC
    pub fn builder() -> EncoderConfigBuilder {
        EncoderConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check invariants a deserialized config may violate
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity < INITIAL_BUFFER_CAPACITY {
            return Err(ConfigError::CapacityTooSmall {
                requested: self.initial_capacity,
                minimum: INITIAL_BUFFER_CAPACITY,
            });
        }
        Ok(())
    }
}

/// Fluent builder for `EncoderConfig`.
#[derive(Debug, Clone)]
pub struct EncoderConfigBuilder {
    config: EncoderConfig,
}

impl EncoderConfigBuilder {
    /// Capacity of each newly allocated buffer, at least 512 bytes
    pub fn initial_capacity(mut self, bytes: usize) -> Self {
        self.config.initial_capacity = bytes;
        self
    }

    /// Zone used by the wall clock
    pub fn time_zone(mut self, time_zone: TimeZone) -> Self {
        self.config.time_zone = time_zone;
        self
    }

    /// Validate and produce the config
    pub fn build(self) -> Result<EncoderConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
