//! Error types for barklog
//!
//! Encoding never fails: every field value is statically typed and oversized
//! keys or values are truncated. The only fallible surface is configuration.

use thiserror::Error;

/// Errors raised while validating an [`EncoderConfig`](crate::EncoderConfig)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Pooled buffers must start with at least the minimum capacity
    #[error("initial buffer capacity {requested} is below the minimum of {minimum} bytes")]
    CapacityTooSmall {
        /// Capacity that was asked for
        requested: usize,
        /// Smallest accepted capacity
        minimum: usize,
    },
}

/// Result type alias for barklog configuration
pub type Result<T> = core::result::Result<T, ConfigError>;
