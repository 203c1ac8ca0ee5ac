//! JSON-like text records
//!
//! One record per line:
//!
//! ```text
//! {"level":"info","time":"<rfc3339>","k1":v1,...,"message":"..."}\n
//! ```
//!
//! Fields appear in call order. Keys are written verbatim between quotes and
//! are never escaped, so a key containing `"` or a control byte yields a line
//! that is not valid JSON. String values are always escaped.

use core::fmt::{Display, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::clock::Clock;
use crate::config::EncoderConfig;
use crate::emitter::Emitter;
use crate::escape::{append_quoted, EscapeWriter};
use crate::number::{
    append_complex32, append_complex64, append_f32, append_f64, append_i64, append_u64, Complex32,
    Complex64,
};
use crate::pool::MetricsSnapshot;
use crate::sink::Sink;
use crate::timefmt::append_rfc3339;
use crate::{ERROR_KEY, MESSAGE_KEY};

const INFO_PREAMBLE: &[u8] = br#"{"level":"info","time":""#;

/// Text record encoder writing to one sink
#[derive(Debug)]
pub struct TextLogger {
    emitter: Emitter,
}

impl TextLogger {
    /// Create a logger with default configuration
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self::with_config(sink, EncoderConfig::default())
    }

    /// Create a logger with explicit configuration
    pub fn with_config(sink: impl Sink + 'static, config: EncoderConfig) -> Self {
        Self {
            emitter: Emitter::new(sink, &config),
        }
    }

    /// Replace the clock used for the `time` field
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.emitter.set_clock(clock);
        self
    }

    /// Start an `info` record
    #[inline]
    pub fn info(&self) -> TextEvent<'_> {
        let (mut buf, now) = self.emitter.acquire();
        buf.extend_from_slice(INFO_PREAMBLE);
        append_rfc3339(&mut buf, &now);
        buf.extend_from_slice(b"\",");
        TextEvent {
            buf,
            emitter: &self.emitter,
        }
    }

    /// Buffer pool counters
    pub fn pool_metrics(&self) -> MetricsSnapshot {
        self.emitter.pool().metrics().snapshot()
    }

    /// Number of records the sink rejected
    pub fn write_failures(&self) -> u64 {
        self.emitter.write_failures()
    }
}

/// A text record under construction
///
/// Finish with [`msg`](Self::msg) to write it, or [`discard`](Self::discard)
/// to give the buffer back unwritten. Dropping it does neither.
#[must_use = "a record is only written by `msg`"]
pub struct TextEvent<'a> {
    buf: Vec<u8>,
    emitter: &'a Emitter,
}

impl TextEvent<'_> {
    #[inline]
    fn key(&mut self, key: &str) {
        self.buf.push(b'"');
        self.buf.extend_from_slice(key.as_bytes());
        self.buf.extend_from_slice(b"\":");
    }

    /// Append a string field
    #[inline]
    pub fn str(mut self, key: &str, val: &str) -> Self {
        self.key(key);
        append_quoted(&mut self.buf, val);
        self.buf.push(b',');
        self
    }

    /// Append a bytes field as standard padded base64
    pub fn bytes(mut self, key: &str, val: &[u8]) -> Self {
        self.key(key);
        self.buf.push(b'"');

        // A slice never exceeds isize::MAX bytes, so the padded length fits.
        let start = self.buf.len();
        let encoded_len = val.len().div_ceil(3) * 4;
        self.buf.resize(start + encoded_len, 0);
        // Padded output is exactly `encoded_len`, so the slice is never short.
        let written = STANDARD
            .encode_slice(val, &mut self.buf[start..])
            .unwrap_or(0);
        self.buf.truncate(start + written);

        self.buf.extend_from_slice(b"\",");
        self
    }

    /// Append a machine-width signed integer field
    #[inline]
    pub fn int(self, key: &str, val: isize) -> Self {
        self.int64(key, val as i64)
    }

    /// Append an `i8` field
    #[inline]
    pub fn int8(self, key: &str, val: i8) -> Self {
        self.int64(key, val.into())
    }

    /// Append an `i16` field
    #[inline]
    pub fn int16(self, key: &str, val: i16) -> Self {
        self.int64(key, val.into())
    }

    /// Append an `i32` field
    #[inline]
    pub fn int32(self, key: &str, val: i32) -> Self {
        self.int64(key, val.into())
    }

    /// Append an `i64` field
    #[inline]
    pub fn int64(mut self, key: &str, val: i64) -> Self {
        self.key(key);
        append_i64(&mut self.buf, val);
        self.buf.push(b',');
        self
    }

    /// Append a machine-width unsigned integer field
    #[inline]
    pub fn uint(self, key: &str, val: usize) -> Self {
        self.uint64(key, val as u64)
    }

    /// Append a `u8` field
    #[inline]
    pub fn uint8(self, key: &str, val: u8) -> Self {
        self.uint64(key, val.into())
    }

    /// Append a `u16` field
    #[inline]
    pub fn uint16(self, key: &str, val: u16) -> Self {
        self.uint64(key, val.into())
    }

    /// Append a `u32` field
    #[inline]
    pub fn uint32(self, key: &str, val: u32) -> Self {
        self.uint64(key, val.into())
    }

    /// Append a `u64` field
    #[inline]
    pub fn uint64(mut self, key: &str, val: u64) -> Self {
        self.key(key);
        append_u64(&mut self.buf, val);
        self.buf.push(b',');
        self
    }

    /// Append a pointer-sized unsigned integer field
    #[inline]
    pub fn uintptr(self, key: &str, val: usize) -> Self {
        self.uint64(key, val as u64)
    }

    /// Append an `f32` field
    #[inline]
    pub fn float32(mut self, key: &str, val: f32) -> Self {
        self.key(key);
        append_f32(&mut self.buf, val);
        self.buf.push(b',');
        self
    }

    /// Append an `f64` field
    #[inline]
    pub fn float64(mut self, key: &str, val: f64) -> Self {
        self.key(key);
        append_f64(&mut self.buf, val);
        self.buf.push(b',');
        self
    }

    /// Append a complex field with `f32` parts as `"(re+imi)"`
    pub fn complex64(mut self, key: &str, val: Complex32) -> Self {
        self.key(key);
        append_complex32(&mut self.buf, val);
        self.buf.push(b',');
        self
    }

    /// Append a complex field with `f64` parts as `"(re+imi)"`
    pub fn complex128(mut self, key: &str, val: Complex64) -> Self {
        self.key(key);
        append_complex64(&mut self.buf, val);
        self.buf.push(b',');
        self
    }

    /// Append a boolean field
    #[inline]
    pub fn bool(mut self, key: &str, val: bool) -> Self {
        self.key(key);
        let literal: &[u8] = if val { b"true," } else { b"false," };
        self.buf.extend_from_slice(literal);
        self
    }

    /// Append an `error` field; `None` writes nothing at all
    ///
    /// If the value's `Display` impl fails partway, the whole field is
    /// dropped rather than written half-formed.
    pub fn error<E: Display + ?Sized>(mut self, err: Option<&E>) -> Self {
        let Some(err) = err else {
            return self;
        };

        let field_start = self.buf.len();
        self.key(ERROR_KEY);
        self.buf.push(b'"');
        if write!(EscapeWriter::new(&mut self.buf), "{}", err).is_err() {
            self.buf.truncate(field_start);
            return self;
        }
        self.buf.extend_from_slice(b"\",");
        self
    }

    /// Append the message, close the record and write it to the sink
    pub fn msg(mut self, msg: &str) {
        self.key(MESSAGE_KEY);
        append_quoted(&mut self.buf, msg);
        self.buf.extend_from_slice(b"}\n");
        self.emitter.emit(self.buf);
    }

    /// Give the buffer back to the pool without writing anything
    pub fn discard(self) {
        self.emitter.discard(self.buf);
    }
}
