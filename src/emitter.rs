//! Record lifecycle shared by the text and binary loggers
//!
//! An [`Emitter`] hands a pooled buffer and a timestamp to each new record,
//! and on completion writes the buffer to the sink and puts it back in the
//! pool. Sink failures stop here: they are counted and traced at `debug`,
//! never returned.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use crate::clock::{Clock, SystemClock};
use crate::config::EncoderConfig;
use crate::pool::BufferPool;
use crate::sink::Sink;

/// Owns the pool, sink and clock behind one logger
pub struct Emitter {
    pool: Arc<BufferPool>,
    sink: Box<dyn Sink>,
    clock: Box<dyn Clock>,
    write_failures: AtomicU64,
}

impl Emitter {
    /// Create an emitter with a fresh pool and a wall clock from `config`
    pub fn new(sink: impl Sink + 'static, config: &EncoderConfig) -> Self {
        Self {
            pool: Arc::new(BufferPool::new(config.initial_capacity)),
            sink: Box::new(sink),
            clock: Box::new(SystemClock::new(config.time_zone)),
            write_failures: AtomicU64::new(0),
        }
    }

    /// Replace the clock used for record timestamps
    pub fn set_clock(&mut self, clock: impl Clock + 'static) {
        self.clock = Box::new(clock);
    }

    /// Take an empty buffer and capture the record's timestamp
    #[inline]
    pub fn acquire(&self) -> (Vec<u8>, DateTime<FixedOffset>) {
        (self.pool.acquire(), self.clock.now())
    }

    /// Write a finished record to the sink and return its buffer to the pool
    ///
    /// A failed write is counted and dropped.
    #[inline]
    pub fn emit(&self, buf: Vec<u8>) {
        if let Err(err) = self.sink.write_record(&buf) {
            let failures = self.write_failures.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::debug!(
                error = %err,
                record_len = buf.len(),
                failures,
                "sink write failed, record dropped"
            );
        }
        self.pool.release(buf);
    }

    /// Return an unfinished record's buffer without writing it
    #[inline]
    pub fn discard(&self, buf: Vec<u8>) {
        self.pool.release(buf);
    }

    /// Number of records the sink failed to accept
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Pool backing this emitter
    pub fn pool(&self) -> &Arc<BufferPool> {
        &self.pool
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("pool", &self.pool)
            .field("write_failures", &self.write_failures())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::sink::WriterSink;
    use chrono::TimeZone;
    use std::io;

    struct FailingSink;

    impl Sink for FailingSink {
        fn write_record(&self, _record: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_emit_writes_and_releases() {
        let sink = Arc::new(WriterSink::new(Vec::new()));
        let emitter = Emitter::new(Arc::clone(&sink), &EncoderConfig::default());

        let (mut buf, _) = emitter.acquire();
        buf.extend_from_slice(b"record");
        emitter.emit(buf);

        assert_eq!(sink.with_writer(|w| w.clone()), b"record");
        assert_eq!(emitter.pool().available(), 1);
        assert_eq!(emitter.write_failures(), 0);
    }

    #[test]
    fn test_failed_write_is_swallowed_and_buffer_released() {
        let emitter = Emitter::new(FailingSink, &EncoderConfig::default());

        let (buf, _) = emitter.acquire();
        emitter.emit(buf);
        let (buf, _) = emitter.acquire();
        emitter.emit(buf);

        assert_eq!(emitter.write_failures(), 2);
        assert_eq!(emitter.pool().available(), 1);
    }

    #[test]
    fn test_discard_skips_sink() {
        let sink = Arc::new(WriterSink::new(Vec::new()));
        let emitter = Emitter::new(Arc::clone(&sink), &EncoderConfig::default());

        let (mut buf, _) = emitter.acquire();
        buf.extend_from_slice(b"never written");
        emitter.discard(buf);

        assert!(sink.with_writer(|w| w.is_empty()));
        assert_eq!(emitter.pool().available(), 1);
    }

    #[test]
    fn test_acquire_uses_clock() {
        let instant = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2001, 2, 3, 4, 5, 6)
            .unwrap();
        let mut emitter = Emitter::new(crate::sink::Discard, &EncoderConfig::default());
        emitter.set_clock(FixedClock::new(instant));

        let (_, now) = emitter.acquire();
        assert_eq!(now, instant);
    }
}
