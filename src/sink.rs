//! Destinations for finished records
//!
//! A sink receives one complete record per call. It may block; it may fail.
//! Failures are absorbed by the emitter and never reach the caller of
//! `msg`.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Destination accepting finished record bytes
///
/// Implementations must tolerate concurrent calls from many threads.
pub trait Sink: Send + Sync {
    /// Write one complete record
    fn write_record(&self, record: &[u8]) -> io::Result<()>;
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    #[inline]
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        (**self).write_record(record)
    }
}

impl<S: Sink + ?Sized> Sink for &S {
    #[inline]
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        (**self).write_record(record)
    }
}

/// Sink over any `io::Write`, serialized through a mutex
///
/// Each record is written with a single `write_all` while the lock is held,
/// so records from concurrent callers never interleave.
#[derive(Debug, Default)]
pub struct WriterSink<W> {
    inner: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    /// Flush the underlying writer
    pub fn flush(&self) -> io::Result<()> {
        self.inner.lock().flush()
    }

    /// Run `f` with the underlying writer locked
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    #[inline]
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        self.inner.lock().write_all(record)
    }
}

/// Sink that accepts and drops every record
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl Sink for Discard {
    #[inline]
    fn write_record(&self, _record: &[u8]) -> io::Result<()> {
        Ok(())
    }
}
