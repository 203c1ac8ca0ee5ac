//! Barklog: allocation-free structured event encoder
//!
//! This crate turns a chain of typed key/value appends into either a
//! JSON-like text line or a compact tagged binary record. Every record is
//! built inside a pooled, reusable buffer so the steady-state path performs
//! no heap allocation.
//!
//! # Text Record
//!
//! ```text
//! {"level":"info","time":"2023-10-01T12:00:00Z","key":value,...,"message":"..."}\n
//! ```
//!
//! # Binary Record
//!
//! ```text
//! +--------------+----------------+----------------------+
//! | RecType u16  | PayloadLen u32 | TimestampNanos i64   |
//! +--------------+----------------+----------------------+
//! | KeyLen u8 | Key | Tag u8 | Value                     |  (repeated)
//! +------------------------------------------------------+
//! ```
//!
//! Fixed-width values are raw little-endian bytes. String, bytes and error
//! values carry a `u16` little-endian length prefix.
//!
//! # Example
//!
//! ```rust
//! use barklog::{BinaryLogger, TextLogger, WriterSink};
//!
//! let text = TextLogger::new(WriterSink::new(Vec::new()));
//! text.info().str("user", "alice").int("attempt", 3).msg("login");
//!
//! let binary = BinaryLogger::new(WriterSink::new(Vec::new()));
//! binary.info().uint64("bytes", 4096).bool("cached", true).msg("fetch");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod binary;
pub mod clock;
pub mod config;
pub mod emitter;
pub mod error;
pub mod escape;
pub mod number;
pub mod pool;
pub mod sink;
pub mod tag;
pub mod text;
pub mod timefmt;

// Re-export main types
pub use binary::{BinaryEvent, BinaryLogger};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EncoderConfig, EncoderConfigBuilder, TimeZone};
pub use error::ConfigError;
pub use number::{Complex, Complex32, Complex64};
pub use pool::{BufferPool, MetricsSnapshot, PoolMetrics};
pub use sink::{Discard, Sink, WriterSink};
pub use tag::{RecordType, Tag};
pub use text::{TextEvent, TextLogger};

/// Initial capacity of every pooled buffer
pub const INITIAL_BUFFER_CAPACITY: usize = 512;

/// Longest key the binary format can carry (longer keys are truncated)
pub const MAX_KEY_LEN: usize = u8::MAX as usize;

/// Longest string, bytes or error value the binary format can carry
pub const MAX_VALUE_LEN: usize = u16::MAX as usize;

/// Binary header size: record type (u16) + payload length (u32)
pub const BINARY_HEADER_SIZE: usize = 6;

/// Binary header plus the i64 timestamp that precedes the first field
pub const BINARY_PREAMBLE_SIZE: usize = BINARY_HEADER_SIZE + 8;

/// Reserved key for the terminal message field
pub const MESSAGE_KEY: &str = "message";

/// Reserved key for error fields
pub const ERROR_KEY: &str = "error";
