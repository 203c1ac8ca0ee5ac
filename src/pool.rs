//! Lock-free pool of reusable record buffers
//!
//! Buffers are allocated lazily on first demand and returned after their
//! record has been written to the sink. The pool has no upper bound and no
//! eviction: a returned buffer keeps whatever capacity it grew to, so later
//! records of similar size never reallocate.
//!
//! # Example
//!
//! ```
//! use barklog::BufferPool;
//!
//! let pool = BufferPool::new(512);
//! let mut buf = pool.acquire();
//! buf.extend_from_slice(b"record");
//! pool.release(buf);
//! assert_eq!(pool.available(), 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam::queue::SegQueue;

use crate::INITIAL_BUFFER_CAPACITY;

/// Unbounded lock-free free-list of `Vec<u8>` buffers
///
/// Acquisition hands out exclusive ownership; a buffer sits either in the
/// queue or with exactly one caller.
#[derive(Debug)]
pub struct BufferPool {
    /// Buffers available for reuse
    queue: SegQueue<Vec<u8>>,

    /// Capacity for each newly allocated buffer
    buffer_capacity: usize,

    metrics: PoolMetrics,
}

/// Counters for pool monitoring
#[derive(Debug, Default)]
pub struct PoolMetrics {
    /// Acquisitions served by a pooled buffer
    pub hits: AtomicU64,

    /// Acquisitions that allocated a new buffer
    pub misses: AtomicU64,

    /// Buffers returned to the pool
    pub releases: AtomicU64,
}

impl PoolMetrics {
    /// Create zeroed metrics
    pub const fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            releases: AtomicU64::new(0),
        }
    }

    #[inline]
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_release(&self) {
        self.releases.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of pool metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Acquisitions served from the pool
    pub hits: u64,
    /// Acquisitions that allocated
    pub misses: u64,
    /// Buffers returned
    pub releases: u64,
}

impl MetricsSnapshot {
    /// Fraction of acquisitions served without allocating (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            1.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl BufferPool {
    /// Create an empty pool whose new buffers start at `buffer_capacity` bytes
    ///
    /// Capacities below [`INITIAL_BUFFER_CAPACITY`] are raised to it.
    pub fn new(buffer_capacity: usize) -> Self {
        Self {
            queue: SegQueue::new(),
            buffer_capacity: buffer_capacity.max(INITIAL_BUFFER_CAPACITY),
            metrics: PoolMetrics::new(),
        }
    }

    /// Take a buffer out of the pool, allocating if none is available
    ///
    /// The returned buffer is empty; its capacity is at least
    /// `buffer_capacity`. Never blocks.
    #[inline]
    pub fn acquire(&self) -> Vec<u8> {
        match self.queue.pop() {
            Some(mut buf) => {
                self.metrics.record_hit();
                buf.clear();
                buf
            }
            None => {
                self.metrics.record_miss();
                tracing::trace!(capacity = self.buffer_capacity, "pool empty, allocating buffer");
                Vec::with_capacity(self.buffer_capacity)
            }
        }
    }

    /// Return a buffer for future reuse
    ///
    /// The contents are left as-is; they are cleared on the next `acquire`.
    #[inline]
    pub fn release(&self, buf: Vec<u8>) {
        self.queue.push(buf);
        self.metrics.record_release();
    }

    /// Number of buffers currently idle in the pool
    #[inline]
    pub fn available(&self) -> usize {
        self.queue.len()
    }

    /// Capacity of newly allocated buffers
    #[inline]
    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Get reference to metrics
    #[inline]
    pub fn metrics(&self) -> &PoolMetrics {
        &self.metrics
    }
}
