//! Time sources for record preambles

use chrono::{DateTime, FixedOffset, Local, Utc};

use crate::config::TimeZone;

/// Source of the timestamp captured when a record is started
pub trait Clock: Send + Sync {
    /// Current time with its UTC offset
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in UTC or the process-local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    time_zone: TimeZone,
}

impl SystemClock {
    /// Create a wall clock reporting in the given zone
    pub const fn new(time_zone: TimeZone) -> Self {
        Self { time_zone }
    }

    /// Zone this clock reports in
    pub const fn time_zone(&self) -> TimeZone {
        self.time_zone
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<FixedOffset> {
        match self.time_zone {
            TimeZone::Utc => Utc::now().fixed_offset(),
            TimeZone::Local => Local::now().fixed_offset(),
        }
    }
}

/// Clock frozen at a single instant
///
/// Makes record output byte-for-byte reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Freeze the clock at `instant`
    pub const fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    #[test]
    fn test_fixed_clock() {
        let instant = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2020, 5, 17, 8, 30, 0)
            .unwrap();
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_system_clock_utc_has_zero_offset() {
        let clock = SystemClock::new(TimeZone::Utc);
        assert_eq!(clock.now().offset().local_minus_utc(), 0);
    }
}
