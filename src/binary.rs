//! Tagged binary records
//!
//! ```text
//! Header:     [type:u16 LE][payloadLen:u32 LE]
//! Timestamp:  [nanosSinceEpoch:i64 LE]
//! Field:      [keyLen:u8][key][tag:u8][value]
//! ```
//!
//! Fixed-width values are raw little-endian bytes; string, bytes and error
//! values are `[len:u16 LE][bytes]`. Keys over 255 bytes and values over
//! 65535 bytes are silently truncated. `int`, `uint` and `uintptr` are
//! always 8 bytes regardless of the host's pointer width.

use core::fmt::{Display, Write};

use crate::clock::Clock;
use crate::config::EncoderConfig;
use crate::emitter::Emitter;
use crate::number::{ByteWriter, Complex32, Complex64};
use crate::pool::MetricsSnapshot;
use crate::sink::Sink;
use crate::tag::{RecordType, Tag};
use crate::timefmt::nanos_since_epoch;
use crate::{BINARY_HEADER_SIZE, ERROR_KEY, MAX_KEY_LEN, MAX_VALUE_LEN, MESSAGE_KEY};

/// Offset of the payload length inside the header
const PAYLOAD_LEN_OFFSET: usize = 2;

/// Binary record encoder writing to one sink
#[derive(Debug)]
pub struct BinaryLogger {
    emitter: Emitter,
}

impl BinaryLogger {
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

    /// Replace the clock used for the record timestamp
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.emitter.set_clock(clock);
        self
    }

    /// Start an `info` record
    ///
    /// The header is a placeholder until `msg` patches it.
    #[inline]
    pub fn info(&self) -> BinaryEvent<'_> {
        let (mut buf, now) = self.emitter.acquire();
        buf.extend_from_slice(&[0u8; BINARY_HEADER_SIZE]);
        buf.extend_from_slice(&nanos_since_epoch(&now).to_le_bytes());
        BinaryEvent {
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

/// Write the record type and payload length into the first six bytes
///
/// `buf` must start with a (placeholder) header. Payloads beyond `u32::MAX`
/// bytes saturate the length field.
#[inline]
pub fn finish_header(buf: &mut [u8], record_type: RecordType) {
    debug_assert!(buf.len() >= BINARY_HEADER_SIZE);

    let payload_len = u32::try_from(buf.len() - BINARY_HEADER_SIZE).unwrap_or(u32::MAX);
    buf[0..PAYLOAD_LEN_OFFSET].copy_from_slice(&record_type.code().to_le_bytes());
    buf[PAYLOAD_LEN_OFFSET..BINARY_HEADER_SIZE].copy_from_slice(&payload_len.to_le_bytes());
}

/// A binary record under construction
///
/// Finish with [`msg`](Self::msg) to write it, or [`discard`](Self::discard)
/// to give the buffer back unwritten. Dropping it does neither.
#[must_use = "a record is only written by `msg`"]
pub struct BinaryEvent<'a> {
    buf: Vec<u8>,
    emitter: &'a Emitter,
}

impl BinaryEvent<'_> {
    /// Write `[keyLen][key][tag]`
    #[inline]
    fn key(&mut self, key: &str, tag: Tag) {
        let key = &key.as_bytes()[..key.len().min(MAX_KEY_LEN)];
        self.buf.push(key.len() as u8);
        self.buf.extend_from_slice(key);
        self.buf.push(tag.code());
    }

    /// Write `[len:u16][bytes]`
    #[inline]
    fn var_bytes(&mut self, val: &[u8]) {
        let val = &val[..val.len().min(MAX_VALUE_LEN)];
        self.buf.extend_from_slice(&(val.len() as u16).to_le_bytes());
        self.buf.extend_from_slice(val);
    }

    /// Append a string field
    #[inline]
    pub fn str(mut self, key: &str, val: &str) -> Self {
        self.key(key, Tag::String);
        self.var_bytes(val.as_bytes());
        self
    }

    /// Append a bytes field
    #[inline]
    pub fn bytes(mut self, key: &str, val: &[u8]) -> Self {
        self.key(key, Tag::Bytes);
        self.var_bytes(val);
        self
    }

    /// Append a machine-width signed integer field (8 bytes on the wire)
    #[inline]
    pub fn int(mut self, key: &str, val: isize) -> Self {
        self.key(key, Tag::Int);
        self.buf.extend_from_slice(&(val as i64).to_le_bytes());
        self
    }

    /// Append an `i8` field
    #[inline]
    pub fn int8(mut self, key: &str, val: i8) -> Self {
        self.key(key, Tag::Int8);
        self.buf.extend_from_slice(&val.to_le_bytes());
        self
    }

    /// Append an `i16` field
    #[inline]
    pub fn int16(mut self, key: &str, val: i16) -> Self {
        self.key(key, Tag::Int16);
        self.buf.extend_from_slice(&val.to_le_bytes());
        self
    }

    /// Append an `i32` field
    #[inline]
    pub fn int32(mut self, key: &str, val: i32) -> Self {
        self.key(key, Tag::Int32);
        self.buf.extend_from_slice(&val.to_le_bytes());
        self
    }

    /// Append an `i64` field
    #[inline]
    pub fn int64(mut self, key: &str, val: i64) -> Self {
        self.key(key, Tag::Int64);
        self.buf.extend_from_slice(&val.to_le_bytes());
        self
    }

    /// Append a machine-width unsigned integer field (8 bytes on the wire)
    #[inline]
    pub fn uint(mut self, key: &str, val: usize) -> Self {
        self.key(key, Tag::Uint);
        self.buf.extend_from_slice(&(val as u64).to_le_bytes());
        self
    }

    /// Append a `u8` field
    #[inline]
    pub fn uint8(mut self, key: &str, val: u8) -> Self {
        self.key(key, Tag::Uint8);
        self.buf.push(val);
        self
    }

    /// Append a `u16` field
    #[inline]
    pub fn uint16(mut self, key: &str, val: u16) -> Self {
        self.key(key, Tag::Uint16);
        self.buf.extend_from_slice(&val.to_le_bytes());
        self
    }

    /// Append a `u32` field
    #[inline]
    pub fn uint32(mut self, key: &str, val: u32) -> Self {
        self.key(key, Tag::Uint32);
        self.buf.extend_from_slice(&val.to_le_bytes());
        self
    }

    /// Append a `u64` field
    #[inline]
    pub fn uint64(mut self, key: &str, val: u64) -> Self {
        self.key(key, Tag::Uint64);
        self.buf.extend_from_slice(&val.to_le_bytes());
        self
    }

    /// Append a pointer-sized unsigned integer field (8 bytes on the wire)
    #[inline]
    pub fn uintptr(mut self, key: &str, val: usize) -> Self {
        self.key(key, Tag::Uintptr);
        self.buf.extend_from_slice(&(val as u64).to_le_bytes());
        self
    }

    /// Append an `f32` field as its IEEE-754 bits
    #[inline]
    pub fn float32(mut self, key: &str, val: f32) -> Self {
        self.key(key, Tag::Float32);
        self.buf.extend_from_slice(&val.to_bits().to_le_bytes());
        self
    }

    /// Append an `f64` field as its IEEE-754 bits
    #[inline]
    pub fn float64(mut self, key: &str, val: f64) -> Self {
        self.key(key, Tag::Float64);
        self.buf.extend_from_slice(&val.to_bits().to_le_bytes());
        self
    }

    /// Append a complex field with `f32` parts, real then imaginary
    #[inline]
    pub fn complex64(mut self, key: &str, val: Complex32) -> Self {
        self.key(key, Tag::Complex64);
        self.buf.extend_from_slice(&val.re.to_bits().to_le_bytes());
        self.buf.extend_from_slice(&val.im.to_bits().to_le_bytes());
        self
    }

    /// Append a complex field with `f64` parts, real then imaginary
    #[inline]
    pub fn complex128(mut self, key: &str, val: Complex64) -> Self {
        self.key(key, Tag::Complex128);
        self.buf.extend_from_slice(&val.re.to_bits().to_le_bytes());
        self.buf.extend_from_slice(&val.im.to_bits().to_le_bytes());
        self
    }

    /// Append a boolean field as a single 1 or 0 byte
    #[inline]
    pub fn bool(mut self, key: &str, val: bool) -> Self {
        self.key(key, Tag::Bool);
        self.buf.push(u8::from(val));
        self
    }

    /// Append an `error` field; `None` writes nothing at all
    ///
    /// The `Display` output is written straight into the record, then
    /// truncated to 65535 bytes and length-prefixed. If the `Display` impl
    /// fails partway, the whole field is dropped.
    pub fn error<E: Display + ?Sized>(mut self, err: Option<&E>) -> Self {
        let Some(err) = err else {
            return self;
        };

        let field_start = self.buf.len();
        self.key(ERROR_KEY, Tag::Err);
        let len_at = self.buf.len();
        self.buf.extend_from_slice(&[0, 0]);
        if write!(ByteWriter(&mut self.buf), "{}", err).is_err() {
            self.buf.truncate(field_start);
            return self;
        }

        let value_start = len_at + 2;
        let value_len = (self.buf.len() - value_start).min(MAX_VALUE_LEN);
        self.buf.truncate(value_start + value_len);
        self.buf[len_at..value_start].copy_from_slice(&(value_len as u16).to_le_bytes());
        self
    }

    /// Append the message, patch the header and write the record to the sink
    pub fn msg(self, msg: &str) {
        let mut event = self.str(MESSAGE_KEY, msg);
        finish_header(&mut event.buf, RecordType::Info);
        event.emitter.emit(event.buf);
    }

    /// Give the buffer back to the pool without writing anything
    pub fn discard(self) {
        self.emitter.discard(self.buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::sink::WriterSink;
    use crate::BINARY_PREAMBLE_SIZE;
    use chrono::{FixedOffset, TimeZone};
    use std::sync::Arc;

    fn logger() -> (BinaryLogger, Arc<WriterSink<Vec<u8>>>) {
        let sink = Arc::new(WriterSink::new(Vec::new()));
        let instant = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(1970, 1, 1, 0, 0, 2)
            .unwrap();
        let logger = BinaryLogger::new(Arc::clone(&sink)).with_clock(FixedClock::new(instant));
        (logger, sink)
    }

    fn output(sink: &WriterSink<Vec<u8>>) -> Vec<u8> {
        sink.with_writer(|w| w.clone())
    }

    #[test]
    fn test_header_and_timestamp() {
        let (logger, sink) = logger();
        logger.info().msg("m");
        let data = output(&sink);

        assert_eq!(&data[0..2], &[1, 0]);
        let payload = u32::from_le_bytes(data[2..6].try_into().unwrap());
        assert_eq!(payload as usize, data.len() - BINARY_HEADER_SIZE);
        let nanos = i64::from_le_bytes(data[6..14].try_into().unwrap());
        assert_eq!(nanos, 2_000_000_000);
    }

    #[test]
    fn test_int_field_layout() {
        let (logger, sink) = logger();
        logger.info().int("n", -64).msg("m");
        let data = output(&sink);

        let field = &data[BINARY_PREAMBLE_SIZE..];
        assert_eq!(field[0], 1);
        assert_eq!(field[1], b'n');
        assert_eq!(field[2], Tag::Int.code());
        assert_eq!(&field[3..11], &(-64i64).to_le_bytes());

        let message = &field[11..];
        assert_eq!(message[0], 7);
        assert_eq!(&message[1..8], b"message");
        assert_eq!(message[8], Tag::String.code());
        assert_eq!(&message[9..11], &[1, 0]);
        assert_eq!(&message[11..], b"m");
    }

    #[test]
    fn test_fixed_width_encodings() {
        let (logger, sink) = logger();
        logger
            .info()
            .int8("a", -8)
            .uint16("b", 0xBEEF)
            .float32("c", 1.5)
            .complex128("d", crate::Complex::new(3.0, 4.0))
            .bool("e", true)
            .msg("");
        let data = output(&sink);
        let body = &data[BINARY_PREAMBLE_SIZE..];

        assert_eq!(&body[0..4], &[1, b'a', Tag::Int8.code(), 0xF8]);
        assert_eq!(&body[4..9], &[1, b'b', Tag::Uint16.code(), 0xEF, 0xBE]);
        assert_eq!(&body[9..12], &[1, b'c', Tag::Float32.code()]);
        assert_eq!(&body[12..16], &1.5f32.to_bits().to_le_bytes());
        assert_eq!(&body[16..19], &[1, b'd', Tag::Complex128.code()]);
        assert_eq!(&body[19..27], &3.0f64.to_bits().to_le_bytes());
        assert_eq!(&body[27..35], &4.0f64.to_bits().to_le_bytes());
        assert_eq!(&body[35..39], &[1, b'e', Tag::Bool.code(), 1]);
    }

    #[test]
    fn test_error_field() {
        let (logger, sink) = logger();
        let err = std::io::Error::new(std::io::ErrorKind::Other, "err");
        logger.info().error(Some(&err)).msg("m");
        let data = output(&sink);
        let body = &data[BINARY_PREAMBLE_SIZE..];

        assert_eq!(&body[0..6], b"\x05error");
        assert_eq!(body[6], Tag::Err.code());
        assert_eq!(&body[7..9], &[3, 0]);
        assert_eq!(&body[9..12], b"err");
    }

    #[test]
    fn test_absent_error_writes_nothing() {
        let (logger, sink) = logger();
        logger.info().error(None::<&std::io::Error>).msg("no_err");
        let data = output(&sink);
        assert!(!data.windows(6).any(|w| w == b"\x05error"));
    }

    struct FailingDisplay;

    impl Display for FailingDisplay {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("partial")?;
            Err(core::fmt::Error)
        }
    }

    #[test]
    fn test_failing_display_drops_error_field() {
        let (logger, sink) = logger();
        logger.info().uint8("a", 1).error(Some(&FailingDisplay)).msg("m");
        let data = output(&sink);
        let body = &data[BINARY_PREAMBLE_SIZE..];

        assert_eq!(&body[0..4], &[1, b'a', Tag::Uint8.code(), 1]);
        assert_eq!(&body[4..12], b"\x07message");
        assert!(!data.windows(7).any(|w| w == b"partial"));
        assert_eq!(data.len(), BINARY_PREAMBLE_SIZE + 4 + 8 + 1 + 2 + 1);
    }

    #[test]
    fn test_long_error_is_truncated() {
        let (logger, sink) = logger();
        let long = "E".repeat(70_000);
        logger.info().error(Some(long.as_str())).msg("m");
        let data = output(&sink);
        let body = &data[BINARY_PREAMBLE_SIZE..];
        assert_eq!(u16::from_le_bytes([body[7], body[8]]), u16::MAX);
        assert_eq!(body[9 + MAX_VALUE_LEN], 7);
    }

    #[test]
    fn test_finish_header_patches_type_and_length() {
        let mut buf = vec![0u8; BINARY_PREAMBLE_SIZE + 3];
        finish_header(&mut buf, RecordType::Info);
        assert_eq!(&buf[0..6], &[1, 0, 11, 0, 0, 0]);
    }
}
